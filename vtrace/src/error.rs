use thiserror::Error;

#[derive(Debug, Error)]
pub enum VtraceError {
    #[error("pixel buffer length {actual} does not match width*height*4 ({expected})")]
    BufferLength { expected: usize, actual: usize },
}
