pub mod loaders;
pub mod mesa;
pub mod nomenclature;
pub mod outcome;
pub mod structure;

pub use loaders::{load_json, load_mesas, read_code_column, save_json, write_extracted};
pub use mesa::{join_with_structure, JoinReport, JoinedMesa, MesaRecord};
pub use nomenclature::{ExtractedRecord, Nomenclator, NomenclatureIndex};
pub use outcome::{
    EmptyReason, ErrorEntry, ErrorLog, FailureCause, FetchOutcome, ResultEntry, ResultStore,
};
pub use structure::StructureIndex;
