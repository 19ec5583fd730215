pub mod jsonl;
pub mod terminal;
