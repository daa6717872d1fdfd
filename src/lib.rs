// wordscan: word and keyword statistics over text, web pages and résumés
//
// This is the library root. Each module corresponds to one stage of the
// source → clean → rank → display flow.

pub mod analysis;
pub mod config;
pub mod error;
pub mod modes;
pub mod output;
pub mod sources;
pub mod text;
