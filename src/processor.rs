//! Build orchestration.
//!
//! One run regenerates the whole output tree from the project sources. Stages
//! run strictly in order and the first error aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::{load_config, SiteConfig};
use crate::constants::{
    CONFIG_FILE, CONTENT_DIR, IGNORE_FILE, MARKER_FILE, OUTPUT_DIR, STAGING_DIR, STATIC_DIR,
    TEMPLATES_DIR, THEME_DIR,
};
use crate::emitter::{emit_page, Emitted};
use crate::error::{Error, Result};
use crate::ignore::{parse_ignore_file, ExclusionRules};
use crate::markdown::CommonMarkConverter;
use crate::mirror::{copy_file, mirror_tree};
use crate::path::{is_document, page_destination, rebase};
use crate::render::render_document;
use crate::template::TemplateRegistry;
use crate::transpile::{transpile_tree, ScriptTranspiler};
use crate::walker::{walk, WalkPolicy};

/// Fixed directory conventions of a project rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(CONTENT_DIR)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join(STATIC_DIR)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(TEMPLATES_DIR)
    }

    pub fn theme_static_dir(&self) -> PathBuf {
        self.root.join(THEME_DIR).join(STATIC_DIR)
    }

    pub fn theme_templates_dir(&self) -> PathBuf {
        self.root.join(THEME_DIR).join(TEMPLATES_DIR)
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn ignore_file(&self) -> PathBuf {
        self.root.join(IGNORE_FILE)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    /// Where theme and project templates are merged before compilation.
    pub fn staged_templates_dir(&self) -> PathBuf {
        self.staging_dir().join(TEMPLATES_DIR)
    }
}

/// Switches for the optional stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub transpile_scripts: bool,
    pub write_marker: bool,
    pub ignore_editor_dir: bool,
    pub walk_policy: WalkPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            transpile_scripts: true,
            write_marker: true,
            ignore_editor_dir: true,
            walk_policy: WalkPolicy::Warn,
        }
    }
}

/// Counts reported by a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub drafts: usize,
    pub assets: usize,
    pub scripts: usize,
}

/// Runs the build pipeline for one project.
pub struct Processor<'a> {
    layout: SiteLayout,
    options: BuildOptions,
    transpiler: &'a dyn ScriptTranspiler,
}

/// Removes `dir` and everything below it; a missing directory is fine.
fn prune_directory(dir: &Path) -> Result<()> {
    if dir.exists() {
        debug!("Pruning '{}'", dir.display());
        fs::remove_dir_all(dir).map_err(|e| Error::file("remove", dir, e))?;
    }
    Ok(())
}

impl<'a> Processor<'a> {
    pub fn new(
        layout: SiteLayout,
        options: BuildOptions,
        transpiler: &'a dyn ScriptTranspiler,
    ) -> Self {
        Self { layout, options, transpiler }
    }

    pub fn layout(&self) -> &SiteLayout {
        &self.layout
    }

    /// Executes every stage in order.
    ///
    /// # Flow
    /// 1. Prunes the scratch directory of an earlier run
    /// 2. Stages theme templates, then project templates, into the scratch directory
    /// 3. Compiles the template registry
    /// 4. Loads the site configuration
    /// 5. Prunes the previous output tree
    /// 6. Mirrors theme static files, then project static files
    /// 7. Renders content documents and mirrors other content files
    /// 8. Removes the scratch directory
    /// 9. Transpiles scripts in the output tree (optional)
    /// 10. Writes the marker file (optional)
    pub fn run(&self) -> Result<BuildReport> {
        let layout = &self.layout;
        let policy = self.options.walk_policy;
        let rules = ExclusionRules::new(self.options.ignore_editor_dir)
            .with_patterns(parse_ignore_file(layout.ignore_file())?);
        let mut report = BuildReport::default();
        info!("Building site in '{}'", layout.root().display());

        prune_directory(&layout.staging_dir())?;
        let staged = layout.staged_templates_dir();
        fs::create_dir_all(&staged).map_err(|e| Error::file("create directory", &staged, e))?;
        mirror_tree(layout.theme_templates_dir(), &staged, &rules, policy)?;
        mirror_tree(layout.templates_dir(), &staged, &rules, policy)?;

        let registry = TemplateRegistry::build(&staged)?;
        info!("Compiled {} layout(s)", registry.len());

        let site = load_config(&CommonMarkConverter::for_config(), layout.config_file())?;

        let output = layout.output_dir();
        prune_directory(&output)?;
        report.assets += mirror_tree(layout.theme_static_dir(), &output, &rules, policy)?;
        report.assets += mirror_tree(layout.static_dir(), &output, &rules, policy)?;

        self.convert_content(&registry, &site, &rules, &mut report)?;
        prune_directory(&layout.staging_dir())?;

        if self.options.transpile_scripts {
            report.scripts = transpile_tree(&output, self.transpiler, policy)?;
            info!("Transpiled {} script(s)", report.scripts);
        }

        if self.options.write_marker {
            fs::create_dir_all(&output).map_err(|e| Error::file("create directory", &output, e))?;
            let marker = output.join(MARKER_FILE);
            fs::File::create(&marker).map_err(|e| Error::file("create", &marker, e))?;
        }

        info!(
            "Built {} page(s), skipped {} draft(s), copied {} asset(s) into '{}'",
            report.pages,
            report.drafts,
            report.assets,
            output.display()
        );
        Ok(report)
    }

    /// Routes each content file to the page emitter or the asset mirror.
    fn convert_content(
        &self,
        registry: &TemplateRegistry,
        site: &SiteConfig,
        rules: &ExclusionRules,
        report: &mut BuildReport,
    ) -> Result<()> {
        let content = self.layout.content_dir();
        let output = self.layout.output_dir();
        let converter = CommonMarkConverter::for_content();

        walk(&content, self.options.walk_policy, |path| {
            let relative = path.strip_prefix(&content).unwrap_or(path);
            if rules.is_excluded(relative) {
                debug!("Skipping excluded file '{}'", path.display());
                return Ok(());
            }

            if !is_document(path) {
                copy_file(path, rebase(path, &content, &output)?)?;
                report.assets += 1;
                return Ok(());
            }

            let source = fs::read_to_string(path).map_err(|e| Error::file("read", path, e))?;
            let document = render_document(&converter, path, &source)?;
            let dest = page_destination(path, &content, &output)?;
            match emit_page(registry, &document, site, &dest)? {
                Emitted::Page => report.pages += 1,
                Emitted::Draft => report.drafts += 1,
            }
            Ok(())
        })?;
        Ok(())
    }
}
