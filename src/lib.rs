pub mod api; // HTTP router, endpoints, error mapping
pub mod catalog; // Static medicine catalog + name normalization
pub mod chat; // Assistant persona, prompt assembly, reply tidying
pub mod config;
pub mod extract; // Label OCR text -> candidate medicine name
pub mod gateway; // Hosted chat-completion and drug-label clients
pub mod profile; // User health profile and accessors
pub mod recommend; // Safety filter + relevance ranker
pub mod translate; // Translation service + bounded cache
