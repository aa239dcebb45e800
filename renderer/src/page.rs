use std::fmt;

use pagebuilder::Template;
use pagebuilder::block::tree::BlockTree;
use pagebuilder::parser::{Parser, ValidationError};

use crate::assemble::{AssemblyMode, assemble};
use crate::data::DataMap;
use crate::error::RenderError;
use crate::merge::merge;
use crate::paths::rewrite_paths;

/// Knobs for building a page.
#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Prefix for relative `<link href>` / `<img src>` references.
    /// `None` leaves asset references untouched.
    pub asset_base: Option<String>,
    pub assembly: AssemblyMode,
}

/// A rendered page: one template combined with one data map.
///
/// All the work happens in the constructor; the view is fixed afterwards.
#[derive(Debug, Clone)]
pub struct Page {
    blocks: BlockTree,
    warnings: Vec<ValidationError>,
    view: String,
}

impl Page {
    /// Parse `source` and render it with `data`.
    pub fn new(
        source: impl Into<String>,
        file_id: usize,
        data: &DataMap,
        options: &PageOptions,
    ) -> Result<Page, RenderError> {
        let template = Parser::new(source.into(), file_id).parse()?;
        Ok(Page::from_template(template, data, options))
    }

    /// Render an already parsed template. Cannot fail: the template's
    /// structure was checked when it was parsed.
    pub fn from_template(template: Template, data: &DataMap, options: &PageOptions) -> Page {
        let _span = tracing::debug_span!("build_page", source_id = template.source_id).entered();

        let mut blocks = template.blocks;
        let replaced = merge(&mut blocks, data);
        let assembled = assemble(&blocks, options.assembly);
        let view = match &options.asset_base {
            Some(base) => rewrite_paths(&assembled, base),
            None => assembled,
        };

        tracing::debug!(
            replaced,
            bytes = view.len(),
            mode = ?options.assembly,
            "page built"
        );
        Page {
            blocks,
            warnings: template.warnings,
            view,
        }
    }

    /// The rendered markup.
    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn into_view(self) -> String {
        self.view
    }

    /// The block tree after data substitution.
    pub fn blocks(&self) -> &BlockTree {
        &self.blocks
    }

    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.view)
    }
}
