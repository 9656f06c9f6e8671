//! Destructuring completeness analysis.
//!
//! Given one compilation unit, finds function parameters and component
//! bindings that destructure an object-shaped type, resolves the type's
//! declared property names, and reports every property the pattern never
//! binds, together with a single insertion fix per site.
//!
//! The analysis is deliberately conservative: types it cannot confidently
//! resolve (shared, exported, ambiguous, or outside the modeled subset)
//! produce no output. The failure mode is always under-reporting, never a
//! false positive and never an error.
//!
//! ```
//! use unpack_analyzer::{AnalyzerConfig, analyze_source};
//!
//! let source = "type T = { a: string; b: number };\nfunction f({ a }: T) {}";
//! let reports = analyze_source("demo.ts", source, &AnalyzerConfig::default()).unwrap();
//! assert_eq!(reports[0].diagnostics[0].property, "b");
//! ```

use anyhow::Result;
use serde::Serialize;
use unpack_binder::BinderState;
use unpack_common::{Diagnostic, InsertFix};
use unpack_parser::{NodeArena, NodeId, ParserState};

pub mod config;
pub use config::AnalyzerConfig;

pub mod shape;
pub use shape::{ResolvedShape, TypeMember};

pub mod oracle;
pub use oracle::{SharingVerdict, sharing_verdict};

pub mod resolve;
pub use resolve::ShapeResolver;

pub mod locate;
pub use locate::{BindingSite, SiteKind};

mod check;

mod patch;
pub use patch::apply_fixes;

/// Findings for one binding site: a diagnostic per missing property and
/// one insertion fix repairing the whole pattern.
#[derive(Clone, Debug, Serialize)]
pub struct SiteReport {
    pub diagnostics: Vec<Diagnostic>,
    pub fix: InsertFix,
}

/// Analysis over one parsed and bound compilation unit.
pub struct Analyzer<'a> {
    arena: &'a NodeArena,
    binder: &'a BinderState,
    config: &'a AnalyzerConfig,
    file_name: &'a str,
}

impl<'a> Analyzer<'a> {
    #[must_use]
    pub fn new(
        arena: &'a NodeArena,
        binder: &'a BinderState,
        config: &'a AnalyzerConfig,
        file_name: &'a str,
    ) -> Analyzer<'a> {
        Analyzer {
            arena,
            binder,
            config,
            file_name,
        }
    }

    /// Analyze the compilation unit rooted at `file`.
    #[must_use]
    pub fn analyze(&self, file: NodeId) -> Vec<SiteReport> {
        locate::SiteLocator::locate(self.arena, self.binder, self.config, file)
            .iter()
            .filter_map(|site| {
                check::check_site(self.arena, self.binder, self.config, self.file_name, site)
            })
            .collect()
    }
}

/// Run the whole pipeline over one source text: scan, parse, bind, analyze.
///
/// The only error is a malformed `config`; unparseable source degrades to
/// fewer findings, never to failure.
pub fn analyze_source(
    file_name: &str,
    source: &str,
    config: &AnalyzerConfig,
) -> Result<Vec<SiteReport>> {
    config.validate()?;
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let file = parser.parse_source_file();
    let mut binder = BinderState::new();
    binder.bind_source_file(parser.arena(), file);
    let analyzer = Analyzer::new(parser.arena(), &binder, config, file_name);
    Ok(analyzer.analyze(file))
}
