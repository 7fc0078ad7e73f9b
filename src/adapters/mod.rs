pub mod fetch;
pub mod http;
pub mod onnx;
