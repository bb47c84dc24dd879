//! The column resolution pipeline.
//!
//! Stages run in a fixed order, each a pure function of its inputs:
//!
//! 1. merge the column sources and drop hidden columns
//! 2. place the expand column
//! 3. apply the caller's transform (never leaving the table without columns)
//! 4. build header rows and flatten to leaves
//! 5. mirror fixed sides for right-to-left tables
//! 6. check the fixed bands for gaps
//! 7. fill widths
//!
//! [`ColumnResolver`] memoizes every stage on its dependencies, so resolving
//! again with unchanged inputs returns the previous values without recomputing.

use std::sync::Arc;

use log::{debug, trace};

use crate::column::{Column, ColumnEntry, Direction, FixedSide, Record};
use crate::diagnostics::Diagnostics;
use crate::element::ColumnNode;
use crate::expand::{ExpandConfig, inject_expand_column};
use crate::gap::has_gap_fixed;
use crate::matrix::{ColumnMatrix, ConvertColumns, HeadCell, HeadMatrix, MatrixBuilder};
use crate::memo::{ByPtr, Memo};
use crate::mirror::revert_for_rtl;
use crate::source::normalize_columns;
use crate::transform::{TransformFn, apply_transform};
use crate::width::{FillWidth, WidthFiller};

/// Everything the column model is derived from.
///
/// Reference-typed inputs are compared by identity between runs: to change
/// the columns, pass a new `Arc`.
pub struct ResolveInput<R> {
    pub columns: Option<Arc<Vec<ColumnEntry<R>>>>,
    /// Declarative column tree, used when `columns` is unset.
    pub children: Option<Arc<Vec<ColumnNode<R>>>>,
    pub expand: Arc<ExpandConfig<R>>,
    pub direction: Direction,
    /// Fixed side requested for the table as a whole.
    pub fixed: Option<FixedSide>,
    pub scroll_width: Option<u32>,
    pub client_width: u32,
    pub transform: Option<TransformFn<R>>,
}

impl<R: Record> Default for ResolveInput<R> {
    fn default() -> Self {
        Self {
            columns: None,
            children: None,
            expand: Arc::new(ExpandConfig::default()),
            direction: Direction::Ltr,
            fixed: None,
            scroll_width: None,
            client_width: 0,
            transform: None,
        }
    }
}

impl<R: Record> ResolveInput<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: Vec<ColumnEntry<R>>) -> Self {
        self.columns = Some(Arc::new(columns));
        self
    }

    pub fn children(mut self, children: Vec<ColumnNode<R>>) -> Self {
        self.children = Some(Arc::new(children));
        self
    }

    pub fn expand(mut self, config: ExpandConfig<R>) -> Self {
        self.expand = Arc::new(config);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn fixed(mut self, side: FixedSide) -> Self {
        self.fixed = Some(side);
        self
    }

    pub fn scroll_width(mut self, width: u32) -> Self {
        self.scroll_width = Some(width);
        self
    }

    pub fn client_width(mut self, width: u32) -> Self {
        self.client_width = width;
        self
    }

    pub fn transform(
        mut self,
        f: impl Fn(Vec<ColumnEntry<R>>) -> Vec<ColumnEntry<R>> + Send + Sync + 'static,
    ) -> Self {
        self.transform = Some(Arc::new(f));
        self
    }
}

/// The render-ready column model.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumns<R> {
    /// Column tree after expand placement and transform.
    pub columns: Arc<Vec<Column<R>>>,
    pub matrix: Arc<ColumnMatrix<R>>,
    /// Leaf columns with concrete widths, fixed sides mirrored for RTL.
    pub flat_columns: Arc<Vec<Column<R>>>,
    pub scroll_width: Option<u32>,
    /// A fixed band contains a column not fixed to that side.
    pub has_gap_fixed: bool,
}

impl<R> ResolvedColumns<R> {
    pub fn head_cells(&self) -> &[Vec<HeadCell<R>>] {
        &self.matrix.head_cells
    }

    pub fn head_matrix(&self) -> &HeadMatrix {
        &self.matrix.head_matrix
    }
}

type Entries<R> = Arc<Vec<ColumnEntry<R>>>;
type Columns<R> = Arc<Vec<Column<R>>>;
type TransformDep<R> =
    ByPtr<dyn Fn(Vec<ColumnEntry<R>>) -> Vec<ColumnEntry<R>> + Send + Sync>;

type SourceDeps<R> = (
    Option<ByPtr<Vec<ColumnEntry<R>>>>,
    Option<ByPtr<Vec<ColumnNode<R>>>>,
);
type ExpandDeps<R> = (
    ByPtr<Vec<ColumnEntry<R>>>,
    ByPtr<ExpandConfig<R>>,
    Option<FixedSide>,
);
type MergeDeps<R> = (ByPtr<Vec<ColumnEntry<R>>>, Option<TransformDep<R>>);
type FillDeps<R> = (ByPtr<Vec<Column<R>>>, Option<u32>, u32);

/// Memoized column resolution.
///
/// # Example
///
/// ```ignore
/// let mut resolver = ColumnResolver::new();
/// let first = resolver.resolve(&input);
/// let second = resolver.resolve(&input);
/// assert!(Arc::ptr_eq(&first.flat_columns, &second.flat_columns));
/// ```
pub struct ColumnResolver<R> {
    matrix_builder: Box<dyn MatrixBuilder<R>>,
    width_filler: Box<dyn WidthFiller<R>>,
    diagnostics: Diagnostics,

    base: Memo<SourceDeps<R>, Entries<R>>,
    with_expand: Memo<ExpandDeps<R>, Entries<R>>,
    merged: Memo<MergeDeps<R>, Columns<R>>,
    matrix: Memo<ByPtr<Vec<Column<R>>>, Arc<ColumnMatrix<R>>>,
    flatten: Memo<(ByPtr<ColumnMatrix<R>>, Direction), Columns<R>>,
    gap: Memo<ByPtr<Vec<Column<R>>>, bool>,
    filled: Memo<FillDeps<R>, (Columns<R>, Option<u32>)>,
}

impl<R: Record> Default for ColumnResolver<R> {
    fn default() -> Self {
        Self {
            matrix_builder: Box::new(ConvertColumns),
            width_filler: Box::new(FillWidth),
            diagnostics: Diagnostics::default(),
            base: Memo::new(),
            with_expand: Memo::new(),
            merged: Memo::new(),
            matrix: Memo::new(),
            flatten: Memo::new(),
            gap: Memo::new(),
            filled: Memo::new(),
        }
    }
}

impl<R: Record> ColumnResolver<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the header/flatten stage.
    pub fn with_matrix_builder(mut self, builder: impl MatrixBuilder<R> + 'static) -> Self {
        self.matrix_builder = Box::new(builder);
        self.matrix.clear();
        self
    }

    /// Replace the width filling stage.
    pub fn with_width_filler(mut self, filler: impl WidthFiller<R> + 'static) -> Self {
        self.width_filler = Box::new(filler);
        self.filled.clear();
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Run the pipeline, recomputing only the stages whose inputs changed.
    pub fn resolve(&mut self, input: &ResolveInput<R>) -> ResolvedColumns<R> {
        let base = self.base.get_or_compute(
            (
                input.columns.as_ref().map(ByPtr::new),
                input.children.as_ref().map(ByPtr::new),
            ),
            || {
                trace!("normalizing column source");
                Arc::new(normalize_columns(
                    input.columns.as_deref().map(Vec::as_slice),
                    input.children.as_deref().map(Vec::as_slice),
                ))
            },
        );

        let diagnostics = &self.diagnostics;
        let with_expand = self.with_expand.get_or_compute(
            (ByPtr::new(&base), ByPtr::new(&input.expand), input.fixed),
            || {
                trace!("placing expand column");
                Arc::new(inject_expand_column(
                    base.as_slice(),
                    &input.expand,
                    input.fixed,
                    diagnostics,
                ))
            },
        );

        let merged = self.merged.get_or_compute(
            (
                ByPtr::new(&with_expand),
                input.transform.as_ref().map(ByPtr::new),
            ),
            || {
                trace!("applying column transform");
                Arc::new(apply_transform(with_expand.as_slice(), input.transform.as_ref()))
            },
        );

        let builder = &self.matrix_builder;
        let matrix = self.matrix.get_or_compute(ByPtr::new(&merged), || {
            trace!("building header matrix for {} columns", merged.len());
            Arc::new(builder.build(merged.as_slice()))
        });

        let flatten = self
            .flatten
            .get_or_compute((ByPtr::new(&matrix), input.direction), || {
                Arc::new(match input.direction {
                    Direction::Rtl => revert_for_rtl(matrix.flat_columns.as_slice()),
                    Direction::Ltr => matrix.flat_columns.clone(),
                })
            });

        let has_gap = self.gap.get_or_compute(ByPtr::new(&flatten), || {
            let gap = has_gap_fixed(flatten.as_slice());
            if gap {
                debug!("fixed columns are not contiguous");
            }
            gap
        });

        let filler = &self.width_filler;
        let (flat_columns, scroll_width) = self.filled.get_or_compute(
            (ByPtr::new(&flatten), input.scroll_width, input.client_width),
            || {
                let (filled, scroll_width) =
                    filler.fill(flatten.as_slice(), input.scroll_width, input.client_width);
                (Arc::new(filled), scroll_width)
            },
        );

        ResolvedColumns {
            columns: merged,
            matrix,
            flat_columns,
            scroll_width,
            has_gap_fixed: has_gap,
        }
    }
}

/// Resolve once, without keeping memoized stages around.
pub fn resolve_columns<R: Record>(input: &ResolveInput<R>) -> ResolvedColumns<R> {
    ColumnResolver::new().resolve(input)
}
