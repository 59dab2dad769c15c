//! # inlive-file-client
//!
//! Client library for the external file-management service. Uploads go out
//! as multipart/form-data; every request carries a service-account bearer
//! token obtained from Keycloak and cached until shortly before expiry.

pub mod client;
pub mod filename;
pub mod token;
pub mod upload;

pub use client::FileManagerClient;
pub use filename::extract_filename;
pub use token::ServiceTokenProvider;
pub use upload::UploadFile;
