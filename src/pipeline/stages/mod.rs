pub mod collector;
pub mod extractor;
pub mod impact;
pub mod writer;

pub use collector::Collector;
pub use extractor::Extractor;
pub use impact::ImpactAnalyzer;
pub use writer::Writer;
