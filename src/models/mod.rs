pub mod document;

pub use document::{
    AnswerResponse, CrossCheckRequest, Document, DocumentId, DocumentList, ErrorBody, FileType,
    HealthStatus, QuestionRequest,
};
