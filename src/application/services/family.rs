//! Family forest service
//!
//! Loads record tables into a forest, resolves people and writes Graphviz output.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use generational_arena::Index;
use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{parse_records, DotWriter, FamilyForest, SkippedLink, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// A built forest together with what the builder could not link.
#[derive(Debug)]
pub struct LoadedForest {
    pub forest: FamilyForest,
    pub skipped: Vec<SkippedLink>,
    /// Where the records came from
    pub source: PathBuf,
}

/// Identifies a person on the command line: a numeric id or a first name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonSelector {
    Id(u32),
    Name(String),
}

impl FromStr for PersonSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<u32>() {
            Ok(id) => PersonSelector::Id(id),
            Err(_) => PersonSelector::Name(s.trim().to_string()),
        })
    }
}

impl fmt::Display for PersonSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonSelector::Id(id) => write!(f, "id {}", id),
            PersonSelector::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Service for loading, querying and exporting family forests.
pub struct FamilyService {
    fs: Arc<dyn FileSystem>,
    settings: Arc<Settings>,
}

impl FamilyService {
    /// Create a new family service.
    pub fn new(fs: Arc<dyn FileSystem>, settings: Arc<Settings>) -> Self {
        Self { fs, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read and build the record table at `path`.
    pub fn load(&self, path: &Path) -> ApplicationResult<LoadedForest> {
        debug!("load: path={}", path.display());
        if !self.fs.exists(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("file not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read records", path)?;
        self.load_str(&content, path)
    }

    /// Parse and build records already in memory. `source` is used for reporting.
    pub fn load_str(&self, content: &str, source: &Path) -> ApplicationResult<LoadedForest> {
        let records = parse_records(content).map_err(|error| ApplicationError::MalformedRecord {
            source_name: source.display().to_string(),
            error,
        })?;
        debug!("load: parsed {} records", records.len());

        let mut builder = TreeBuilder::with_max_children(self.settings.max_children);
        let forest = builder.build(records)?;
        info!(
            "loaded {} people in {} trees from {}",
            forest.len(),
            forest.roots().len(),
            source.display()
        );

        Ok(LoadedForest {
            forest,
            skipped: builder.skipped_links().to_vec(),
            source: source.to_path_buf(),
        })
    }

    /// Find the person a selector refers to. Names match the first person in
    /// pre-order over all trees.
    pub fn resolve(
        &self,
        forest: &FamilyForest,
        selector: &PersonSelector,
    ) -> ApplicationResult<Index> {
        let found = match selector {
            PersonSelector::Id(id) => forest.find_by_id(*id),
            PersonSelector::Name(name) => forest.find_by_name_in_forest(name),
        };
        found.ok_or_else(|| ApplicationError::PersonNotFound(selector.to_string()))
    }

    /// Nearest common ancestor of two selected people, if they share a tree.
    pub fn common_ancestor(
        &self,
        forest: &FamilyForest,
        a: &PersonSelector,
        b: &PersonSelector,
    ) -> ApplicationResult<Option<Index>> {
        let a = self.resolve(forest, a)?;
        let b = self.resolve(forest, b)?;
        Ok(forest.nearest_common_ancestor(a, b))
    }

    /// Graphviz text covering every tree of the forest.
    pub fn render_dot(&self, forest: &FamilyForest) -> String {
        DotWriter::new(self.settings.graph_name.clone()).render(forest, forest.roots())
    }

    /// Write the Graphviz file and return the number of edges written.
    pub fn export_dot(&self, forest: &FamilyForest, path: &Path) -> ApplicationResult<usize> {
        let dot = self.render_dot(forest);
        self.fs
            .write(path, &dot)
            .with_path_context("write graph", path)?;

        let edges = forest
            .roots()
            .iter()
            .map(|&root| forest.edges(root).count())
            .sum();
        info!("exported {} edges to {}", edges, path.display());
        Ok(edges)
    }
}
