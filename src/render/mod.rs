pub mod mermaid;
pub mod report;

pub use mermaid::generate_mermaid;
pub use report::format_ranking;
