//! Asynchronous and parallel parsing front ends.
//!
//! Parsing itself is synchronous and CPU-bound. These wrappers read
//! sources with tokio's non-blocking file I/O and fan independent sources
//! out over a rayon thread pool. Every parse runs on a thread with
//! [`PARSER_STACK_SIZE`] bytes of stack so the default nesting limit is
//! reached before the stack runs out.
//!
//! # Example
//!
//! ```ignore
//! use esgrove_parser::{AsyncParser, ParseOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let parser = AsyncParser::new(ParseOptions::module());
//!     let program = parser.parse_file("main.mjs").await.unwrap();
//!     println!("{} statements", program.body.len());
//! }
//! ```

use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::ast::Program;
use crate::error::{Error, Result};
use crate::options::{PARSER_STACK_SIZE, ParseOptions};
use crate::parser::Parser;

/// Runs one parse on a scoped thread with a large stack.
fn parse_on_large_stack(source: &str, options: ParseOptions) -> Result<Program> {
    std::thread::scope(|scope| {
        let handle = std::thread::Builder::new()
            .name("esgrove-parse".to_string())
            .stack_size(PARSER_STACK_SIZE)
            .spawn_scoped(scope, || Parser::with_options(source, options).parse_program())
            .map_err(|e| Error::Io(format!("Failed to spawn parser thread: {}", e)))?;
        handle
            .join()
            .map_err(|_| Error::Io("Parser thread panicked".to_string()))?
    })
}

/// Parses files read with async I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsyncParser {
    options: ParseOptions,
}

impl AsyncParser {
    /// Creates a parser front end that uses `options` for every file.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// The options applied to every parse.
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses source text that is already in memory.
    pub fn parse_source(&self, source: &str) -> Result<Program> {
        parse_on_large_stack(source, self.options)
    }

    /// Reads and parses one file.
    pub async fn parse_file(&self, path: impl AsRef<Path>) -> Result<Program> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .await
            .map_err(|e| Error::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), len = source.len(), "read source file");
        let options = self.options;
        tokio::task::spawn_blocking(move || parse_on_large_stack(&source, options))
            .await
            .map_err(|e| Error::Io(format!("Parse task failed: {}", e)))?
    }

    /// Reads and parses several files concurrently.
    ///
    /// Results are returned in the order of `paths`.
    pub async fn parse_files(&self, paths: &[impl AsRef<Path>]) -> Vec<Result<Program>> {
        let futures: Vec<_> = paths.iter().map(|p| self.parse_file(p)).collect();
        futures::future::join_all(futures).await
    }
}

/// Parses many sources on a thread pool.
#[cfg(feature = "parallel")]
pub struct ParallelParser {
    pool: rayon::ThreadPool,
    options: ParseOptions,
}

#[cfg(feature = "parallel")]
impl ParallelParser {
    /// Creates a parallel parser with the default number of threads.
    pub fn new(options: ParseOptions) -> Result<Self> {
        Self::build(rayon::ThreadPoolBuilder::new(), options)
    }

    /// Creates a parallel parser with a specific number of threads.
    pub fn with_threads(num_threads: usize, options: ParseOptions) -> Result<Self> {
        Self::build(rayon::ThreadPoolBuilder::new().num_threads(num_threads), options)
    }

    fn build(builder: rayon::ThreadPoolBuilder, options: ParseOptions) -> Result<Self> {
        let pool = builder
            .stack_size(PARSER_STACK_SIZE)
            .thread_name(|index| format!("esgrove-parse-{}", index))
            .build()
            .map_err(|e| Error::Io(format!("Failed to create thread pool: {}", e)))?;
        Ok(Self { pool, options })
    }

    /// Parses every source. Results keep the order of `sources`.
    pub fn parse_parallel(&self, sources: &[&str]) -> Vec<Result<Program>> {
        use rayon::prelude::*;

        let options = self.options;
        self.pool.install(|| {
            sources
                .par_iter()
                .map(|source| Parser::with_options(source, options).parse_program())
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_parse_file() {
        let dir = std::env::temp_dir().join(format!("esgrove-async-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("a.js");
        std::fs::write(&file, "var x = 1;").unwrap();

        let parser = AsyncParser::default();
        let program = parser.parse_file(&file).await.unwrap();
        assert_eq!(program.body.len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_parse_missing_file() {
        let parser = AsyncParser::default();
        let err = parser.parse_file("/definitely/not/here.js").await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[tokio::test]
    async fn test_parse_files_keeps_order() {
        let dir = std::env::temp_dir().join(format!("esgrove-async-many-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let good = dir.join("good.js");
        let bad = dir.join("bad.js");
        std::fs::write(&good, "let a = 1; let b = 2;").unwrap();
        std::fs::write(&bad, "let a; let a;").unwrap();

        let parser = AsyncParser::default();
        let results = parser.parse_files(&[&good, &bad]).await;
        assert_eq!(results[0].as_ref().map(|p| p.body.len()), Ok(2));
        assert_eq!(
            results[1].as_ref().map_err(|e| e.kind()).err(),
            Some(Some(ErrorKind::DuplicateBinding))
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    fn deep_parens(depth: usize) -> String {
        format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth))
    }

    #[test]
    fn test_parse_source_deep_nesting() {
        let parser = AsyncParser::default();
        assert!(parser.parse_source(&deep_parens(100)).is_ok());
        let err = parser.parse_source(&deep_parens(400)).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::EarlyError));
    }

    #[tokio::test]
    async fn test_parse_file_deep_nesting() {
        let dir = std::env::temp_dir().join(format!("esgrove-async-deep-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("deep.js");
        std::fs::write(&file, deep_parens(100)).unwrap();

        let program = AsyncParser::default().parse_file(&file).await.unwrap();
        assert_eq!(program.body.len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parse_parallel_deep_nesting() {
        let parser = ParallelParser::new(ParseOptions::default()).unwrap();
        let deep = deep_parens(100);
        let results = parser.parse_parallel(&[deep.as_str(), "1;"]);
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parse_parallel() {
        let parser = ParallelParser::with_threads(2, ParseOptions::module()).unwrap();
        let results = parser.parse_parallel(&["export var a;", "with (a) {}", "import b from 'b';"]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
