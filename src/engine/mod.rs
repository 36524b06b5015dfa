mod batch_importer;
mod deal_creator;

pub use batch_importer::BatchImporter;
pub use deal_creator::DealCreator;
