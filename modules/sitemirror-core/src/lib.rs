//! Scrape-and-clone pipeline: capture a page through Browserless, distill it
//! into a structured fingerprint, and generate a standalone HTML/CSS/JS clone
//! through a Gemini completion.

pub mod capture;
pub mod cloner;
pub mod content;
pub mod context;
pub mod error;
pub mod fingerprint;
pub mod limits;
pub mod prompt;
pub mod scrape;
pub mod scripts;
pub mod splitter;

pub use capture::{BrowserlessCapturer, CapturedPage, PageCapturer};
pub use cloner::{clone_metadata, Cloner};
pub use error::{CloneError, ScrapeError};
pub use fingerprint::{CloneArtifact, CloneMetadata, ScrapeResult};
pub use scrape::Scraper;
