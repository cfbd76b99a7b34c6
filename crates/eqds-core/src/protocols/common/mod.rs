pub mod sink;

pub use sink::TextSink;
