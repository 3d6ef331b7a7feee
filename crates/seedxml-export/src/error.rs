use seedxml_model::EntityRef;
use seedxml_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown model {0}")]
    UnknownModel(String),
    #[error("nothing to export: {0} does not exist")]
    NothingToExport(EntityRef),
    #[error("unknown external id {0}")]
    UnknownExternalId(String),
    #[error("field {field} on {model} is relational but names no related model")]
    MissingRelatedModel { model: String, field: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, ExportError>;
