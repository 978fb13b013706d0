pub mod transcript_parser;
