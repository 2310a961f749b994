//! # orfscan - Open Reading Frame Scanner
//!
//! Finds open reading frames in a FASTA-like corpus held in memory as one
//! buffer, and shows them in a terminal viewer or writes them out.
//!
//! ## Architecture
//!
//! - `scan`: buffer, header discovery, sanitization, ORF search, record walk
//! - `sink`: output destinations sharing one line-sequence contract
//! - `model`: viewer data structures and state
//! - `event`: keyboard event handling (Vim-style navigation)
//! - `ui`: TUI rendering with ratatui
//! - `controller`: orchestration of the viewer loop
//!
//! ## Example
//!
//! ```
//! use orfscan::scan::{prepare, walk, SeqBuffer};
//! use orfscan::sink::{emit, MemorySink};
//!
//! let mut buffer = SeqBuffer::from_text(">SEQ2004\nATGAAATAA\n>SEQ2005\nATGTGA\n");
//! let layout = prepare(&mut buffer, "2004").unwrap();
//! let mut sink = MemorySink::new();
//! emit(walk(&buffer, &layout), &mut sink).unwrap();
//! assert_eq!(sink.lines(), [">SEQ2004", "ATGAAATAA", "", ">SEQ2005", "ATGTGA", ""]);
//! ```

pub mod controller;
pub mod event;
pub mod model;
pub mod scan;
pub mod sink;
pub mod ui;
