pub mod confirm;
pub mod id_extractor;
pub mod result_writer;
pub mod sampling;

pub use confirm::{ask_confirmation, is_affirmative};
pub use id_extractor::{ExtractSummary, IdExtractor};
pub use result_writer::ResultWriter;
pub use sampling::pick_sample;
