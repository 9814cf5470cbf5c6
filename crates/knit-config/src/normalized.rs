//! The validated configuration handed to the build engine.
//!
//! [`NormalizedConfig::from_raw`] checks a [`RawConfig`] in one pass and
//! reports every problem it finds. On success every default is filled in,
//! patterns are compiled and filename templates parsed, so the build engine
//! never has to look at the raw shape again.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::dev::{DevServerOptions, HttpsOptions, ProxyOptions};
use crate::error::{ValidationError, ValidationErrors};
use crate::options::{
    AssetType, BoolOr, CacheGroupOptions, CacheOptions, CacheType, ChunksKind, EntryInput,
    EntryObject, EntryValue, FlatEntry, Mode, ModuleOptions, OneOrMany, OptimizationOptions,
    OutputOptions, PLUGIN_ORDER_RANGE, PluginInput, PluginOptions, RawConfig, ResolveOptions,
    RuleOptions, RuntimeChunkKind, SplitChunksOptions, UseInput, UseObject,
};
use crate::pattern::Pattern;
use crate::template::FilenameTemplate;

static DEVTOOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:eval|(?:inline-|hidden-|eval-)?(?:nosources-)?(?:cheap-(?:module-)?)?source-map)$")
        .expect("devtool pattern is valid")
});

static GLOBAL_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*$")
        .expect("global name pattern is valid")
});

const PROXY_SCHEMES: [&str; 4] = ["http://", "https://", "ws://", "wss://"];

/// A named bundle root.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    /// Modules loaded when the entry starts, in order
    pub imports: Vec<String>,
    /// Entries this one shares modules with instead of bundling them again
    pub depend_on: Vec<String>,
    /// Overrides `output.filename` for this entry
    pub filename: Option<FilenameTemplate>,
}

impl Entry {
    fn to_raw(&self) -> EntryValue {
        if self.depend_on.is_empty() && self.filename.is_none() {
            return EntryValue::Import(OneOrMany::from_vec(self.imports.clone()));
        }
        EntryValue::Object(EntryObject {
            import: OneOrMany::from_vec(self.imports.clone()),
            depend_on: (!self.depend_on.is_empty())
                .then(|| OneOrMany::from_vec(self.depend_on.clone())),
            filename: self.filename.as_ref().map(|t| t.as_str().to_string()),
        })
    }
}

/// Where bundles go and what they are called.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    pub path: PathBuf,
    pub filename: FilenameTemplate,
    pub chunk_filename: FilenameTemplate,
    pub asset_filename: FilenameTemplate,
    pub public_path: String,
    pub clean: bool,
}

impl OutputSpec {
    /// The template naming `entry`'s bundle.
    pub fn filename_for<'a>(&'a self, entry: &'a Entry) -> &'a FilenameTemplate {
        entry.filename.as_ref().unwrap_or(&self.filename)
    }

    fn to_raw(&self) -> OutputOptions {
        OutputOptions {
            path: self.path.clone(),
            filename: self.filename.to_string(),
            chunk_filename: self.chunk_filename.to_string(),
            asset_filename: self.asset_filename.to_string(),
            public_path: self.public_path.clone(),
            clean: self.clean,
        }
    }
}

/// A loader and the options it is called with.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderRef {
    pub loader: String,
    pub options: Map<String, Value>,
}

impl LoaderRef {
    fn to_raw(&self) -> UseInput {
        if self.options.is_empty() {
            UseInput::Name(self.loader.clone())
        } else {
            UseInput::Detailed(UseObject {
                loader: self.loader.clone(),
                options: Some(Value::Object(self.options.clone())),
            })
        }
    }
}

/// Selects modules by path and names how they are processed.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub test: Pattern,
    /// Loader chain, applied last to first
    pub loaders: Vec<LoaderRef>,
    pub kind: Option<AssetType>,
    pub include: Vec<Pattern>,
    pub exclude: Vec<Pattern>,
}

impl Rule {
    /// Whether the rule applies to the module at `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.test.is_match(path)
            && (self.include.is_empty() || self.include.iter().any(|p| p.is_match(path)))
            && !self.exclude.iter().any(|p| p.is_match(path))
    }

    fn to_raw(&self) -> RuleOptions {
        RuleOptions {
            test: self.test.to_string(),
            use_: (!self.loaders.is_empty())
                .then(|| OneOrMany::from_vec(self.loaders.iter().map(LoaderRef::to_raw).collect())),
            loader: None,
            options: None,
            kind: self.kind,
            include: patterns_to_raw(&self.include),
            exclude: patterns_to_raw(&self.exclude),
        }
    }
}

fn patterns_to_raw(patterns: &[Pattern]) -> Option<OneOrMany<String>> {
    (!patterns.is_empty())
        .then(|| OneOrMany::from_vec(patterns.iter().map(Pattern::to_string).collect()))
}

/// A plugin the build engine loads, with its options.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginRef {
    pub name: String,
    pub options: Map<String, Value>,
    pub order: i32,
}

impl PluginRef {
    fn to_raw(&self) -> PluginInput {
        if self.options.is_empty() && self.order == 0 {
            return PluginInput::Name(self.name.clone());
        }
        PluginInput::Detailed(PluginOptions {
            name: self.name.clone(),
            options: (!self.options.is_empty()).then(|| Value::Object(self.options.clone())),
            order: self.order,
            enabled: true,
        })
    }
}

/// A module left out of the bundle and read from a global at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalRef {
    pub module: String,
    pub global: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DevServer {
    pub host: String,
    pub port: Option<u16>,
    pub hot: bool,
    pub live_reload: bool,
    pub open: bool,
    pub history_api_fallback: bool,
    pub static_dir: Option<PathBuf>,
    pub headers: IndexMap<String, String>,
    pub proxies: Vec<Proxy>,
    pub https: Option<HttpsOptions>,
}

impl DevServer {
    fn to_raw(&self) -> DevServerOptions {
        DevServerOptions {
            host: self.host.clone(),
            port: self.port,
            hot: self.hot,
            live_reload: self.live_reload,
            open: self.open,
            history_api_fallback: self.history_api_fallback,
            static_dir: self.static_dir.clone(),
            headers: self.headers.clone(),
            proxy: self
                .proxies
                .iter()
                .map(|proxy| (proxy.context.clone(), proxy.to_raw()))
                .collect(),
            https: self.https.clone(),
        }
    }
}

/// Requests under `context` forwarded to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Proxy {
    pub context: String,
    pub target: String,
    pub ws: bool,
    pub change_origin: bool,
    pub headers: IndexMap<String, String>,
    pub rewrite: Option<Pattern>,
}

impl Proxy {
    fn to_raw(&self) -> ProxyOptions {
        ProxyOptions {
            target: self.target.clone(),
            ws: self.ws,
            change_origin: self.change_origin,
            headers: self.headers.clone(),
            rewrite: self.rewrite.as_ref().map(Pattern::to_string),
        }
    }
}

/// A validated `devtool` value such as `cheap-module-source-map`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapStyle(String);

impl SourceMapStyle {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Modules are wrapped in `eval`, which is fast to rebuild and unfit for production.
    pub fn is_eval(&self) -> bool {
        self.0.starts_with("eval")
    }

    pub fn is_inline(&self) -> bool {
        self.0.starts_with("inline-")
    }

    /// The map is emitted without a reference comment in the bundle.
    pub fn is_hidden(&self) -> bool {
        self.0.starts_with("hidden-")
    }

    /// Line-only mappings.
    pub fn is_cheap(&self) -> bool {
        self.0.contains("cheap-")
    }

    pub fn includes_sources(&self) -> bool {
        !self.0.contains("nosources-")
    }
}

impl fmt::Display for SourceMapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Optimization {
    pub minimize: bool,
    pub runtime_chunk: Option<RuntimeChunkKind>,
    /// `None` when chunk splitting is disabled
    pub split_chunks: Option<SplitChunks>,
}

impl Optimization {
    fn to_raw(&self) -> OptimizationOptions {
        OptimizationOptions {
            minimize: Some(self.minimize),
            runtime_chunk: self.runtime_chunk.map(BoolOr::Value),
            split_chunks: Some(match &self.split_chunks {
                Some(split) => BoolOr::Value(split.to_raw()),
                None => BoolOr::Bool(false),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitChunks {
    pub chunks: ChunksKind,
    pub min_size: u64,
    /// 0 means no limit
    pub max_size: u64,
    pub min_chunks: u32,
    pub cache_groups: Vec<CacheGroup>,
}

impl SplitChunks {
    fn to_raw(&self) -> SplitChunksOptions {
        SplitChunksOptions {
            chunks: self.chunks,
            min_size: self.min_size,
            max_size: self.max_size,
            min_chunks: self.min_chunks,
            cache_groups: self
                .cache_groups
                .iter()
                .map(|group| (group.key.clone(), group.to_raw()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheGroup {
    pub key: String,
    pub test: Option<Pattern>,
    /// Name of the emitted chunk, the key unless set
    pub name: String,
    pub chunks: ChunksKind,
    pub priority: i32,
    pub reuse_existing_chunk: bool,
    pub enforce: bool,
}

impl CacheGroup {
    fn to_raw(&self) -> CacheGroupOptions {
        CacheGroupOptions {
            test: self.test.as_ref().map(Pattern::to_string),
            name: Some(self.name.clone()),
            chunks: Some(self.chunks),
            priority: self.priority,
            reuse_existing_chunk: self.reuse_existing_chunk,
            enforce: self.enforce,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSpec {
    Memory,
    Filesystem {
        directory: Option<PathBuf>,
        name: Option<String>,
    },
}

impl CacheSpec {
    fn to_raw(&self) -> BoolOr<CacheOptions> {
        match self {
            CacheSpec::Memory => BoolOr::Bool(true),
            CacheSpec::Filesystem { directory, name } => BoolOr::Value(CacheOptions {
                kind: CacheType::Filesystem,
                cache_directory: directory.clone(),
                name: name.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveSpec {
    pub extensions: Vec<String>,
    pub alias: IndexMap<String, String>,
}

/// A complete, validated configuration.
///
/// Built only by [`NormalizedConfig::from_raw`] (or the loader), and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedConfig {
    mode: Mode,
    context: Option<PathBuf>,
    entries: IndexMap<String, Entry>,
    output: OutputSpec,
    rules: Vec<Rule>,
    plugins: Vec<PluginRef>,
    externals: Vec<ExternalRef>,
    dev_server: Option<DevServer>,
    devtool: Option<SourceMapStyle>,
    optimization: Optimization,
    cache: Option<CacheSpec>,
    resolve: ResolveSpec,
}

impl NormalizedConfig {
    /// Validates `raw` and fills in every default.
    ///
    /// # Example
    ///
    /// ```
    /// use knit_config::{NormalizedConfig, RawConfig};
    /// use serde_json::json;
    ///
    /// let raw = RawConfig::from_value(json!({ "entry": "./src/index.js" })).unwrap();
    /// let config = NormalizedConfig::from_raw(raw).unwrap();
    /// assert_eq!(config.output().filename.as_str(), "[name].js");
    /// assert!(config.entry("main").is_some());
    /// ```
    pub fn from_raw(raw: RawConfig) -> Result<Self, ValidationErrors> {
        let mut checks = Checks::default();

        let entries = checks.entries(raw.entry.as_ref());
        let output = checks.output(&raw.output, &entries);
        let rules = checks.rules(&raw.module.rules);
        let plugins = checks.plugins(&raw.plugins);
        let externals = checks.externals(&raw.externals);
        let dev_server = raw.dev_server.as_ref().map(|d| checks.dev_server(d));
        let devtool = checks.devtool(raw.devtool.as_ref());
        let optimization = checks.optimization(&raw.optimization, raw.mode);
        let cache = checks.cache(raw.cache.as_ref());
        let resolve = checks.resolve(&raw.resolve);

        debug!(
            entries = entries.len(),
            rules = rules.len(),
            plugins = plugins.len(),
            errors = checks.errors.len(),
            "normalized configuration"
        );

        match output {
            Some(output) if checks.errors.is_empty() => Ok(Self {
                mode: raw.mode,
                context: raw.context,
                entries,
                output,
                rules,
                plugins,
                externals,
                dev_server,
                devtool,
                optimization,
                cache,
                resolve,
            }),
            _ => Err(checks.errors),
        }
    }

    /// The raw shape of this configuration, with every default spelled out.
    ///
    /// Normalizing the result gives back an equal configuration.
    pub fn to_raw(&self) -> RawConfig {
        RawConfig {
            mode: self.mode,
            context: self.context.clone(),
            entry: Some(EntryInput::Named(
                self.entries
                    .values()
                    .map(|entry| (entry.name.clone(), entry.to_raw()))
                    .collect(),
            )),
            output: self.output.to_raw(),
            module: ModuleOptions {
                rules: self.rules.iter().map(Rule::to_raw).collect(),
            },
            plugins: self.plugins.iter().map(PluginRef::to_raw).collect(),
            externals: self
                .externals
                .iter()
                .map(|external| (external.module.clone(), external.global.clone()))
                .collect(),
            dev_server: self.dev_server.as_ref().map(DevServer::to_raw),
            devtool: self
                .devtool
                .as_ref()
                .map(|style| BoolOr::Value(style.as_str().to_string())),
            optimization: self.optimization.to_raw(),
            cache: self.cache.as_ref().map(CacheSpec::to_raw),
            resolve: ResolveOptions {
                extensions: self.resolve.extensions.clone(),
                alias: self.resolve.alias.clone(),
            },
            profiles: IndexMap::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Base directory of relative entry imports.
    pub fn context(&self) -> Option<&Path> {
        self.context.as_deref()
    }

    /// Entries in declaration order, keyed by name.
    pub fn entries(&self) -> &IndexMap<String, Entry> {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn output(&self) -> &OutputSpec {
        &self.output
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rules applying to the module at `path`, in declaration order.
    pub fn rules_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.matches(path))
    }

    /// Enabled plugins, sorted by `order` (declaration order among equals).
    pub fn plugins(&self) -> &[PluginRef] {
        &self.plugins
    }

    pub fn externals(&self) -> &[ExternalRef] {
        &self.externals
    }

    pub fn external(&self, module: &str) -> Option<&ExternalRef> {
        self.externals.iter().find(|external| external.module == module)
    }

    pub fn dev_server(&self) -> Option<&DevServer> {
        self.dev_server.as_ref()
    }

    pub fn devtool(&self) -> Option<&SourceMapStyle> {
        self.devtool.as_ref()
    }

    pub fn optimization(&self) -> &Optimization {
        &self.optimization
    }

    pub fn cache(&self) -> Option<&CacheSpec> {
        self.cache.as_ref()
    }

    pub fn resolve(&self) -> &ResolveSpec {
        &self.resolve
    }
}

impl Serialize for NormalizedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw().serialize(serializer)
    }
}

/// Accumulates validation errors while normalizing.
#[derive(Default)]
struct Checks {
    errors: ValidationErrors,
}

impl Checks {
    fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn invalid(&mut self, field: impl Into<String>, value: impl fmt::Display, hint: impl Into<String>) {
        self.push(ValidationError::invalid_value(field, value, hint));
    }

    fn template(&mut self, field: &str, source: &str) -> Option<FilenameTemplate> {
        FilenameTemplate::parse(source)
            .map_err(|source_error| {
                self.push(ValidationError::InvalidTemplate {
                    field: field.to_string(),
                    template: source.to_string(),
                    source: source_error,
                })
            })
            .ok()
    }

    fn pattern(&mut self, field: &str, source: &str) -> Option<Pattern> {
        Pattern::parse(source)
            .map_err(|source_error| {
                self.push(ValidationError::InvalidPattern {
                    field: field.to_string(),
                    pattern: source.to_string(),
                    source: source_error,
                })
            })
            .ok()
    }

    fn patterns(&mut self, field: &str, sources: Option<&OneOrMany<String>>) -> Vec<Pattern> {
        match sources {
            None => Vec::new(),
            Some(OneOrMany::One(source)) => self.pattern(field, source).into_iter().collect(),
            Some(OneOrMany::Many(sources)) => sources
                .iter()
                .enumerate()
                .filter_map(|(i, source)| self.pattern(&format!("{field}[{i}]"), source))
                .collect(),
        }
    }

    /// Free-form options: absent, null or a table.
    fn options(&mut self, field: &str, options: Option<&Value>) -> Option<Map<String, Value>> {
        match options {
            None | Some(Value::Null) => Some(Map::new()),
            Some(Value::Object(map)) => Some(map.clone()),
            Some(other) => {
                self.invalid(field, other, "options must be a table");
                None
            }
        }
    }

    fn entries(&mut self, input: Option<&EntryInput>) -> IndexMap<String, Entry> {
        let Some(input) = input else {
            self.push(ValidationError::MissingField {
                field: "entry".to_string(),
                hint: "declare at least one entry point, e.g. entry = \"./src/index.js\""
                    .to_string(),
            });
            return IndexMap::new();
        };

        let flat = input.flatten();
        if flat.is_empty() {
            self.push(ValidationError::NoEntries);
            return IndexMap::new();
        }

        let mut entries: IndexMap<String, Entry> = IndexMap::with_capacity(flat.len());
        let mut reported = HashSet::new();

        for FlatEntry {
            name,
            imports,
            depend_on,
            filename,
        } in flat
        {
            if entries.contains_key(&name) {
                if reported.insert(name.clone()) {
                    self.push(ValidationError::DuplicateEntry { name });
                }
                continue;
            }

            if name.trim().is_empty() {
                self.push(ValidationError::InvalidEntryName {
                    name: name.clone(),
                    reason: "entry names must not be empty".to_string(),
                });
            } else if name.trim() != name {
                self.push(ValidationError::InvalidEntryName {
                    name: name.clone(),
                    reason: "entry names must not start or end with whitespace".to_string(),
                });
            }

            if imports.is_empty() {
                self.push(ValidationError::EmptyEntry { name: name.clone() });
            }
            for import in &imports {
                if import.trim().is_empty() {
                    self.invalid(
                        format!("entry.{name}.import"),
                        "\"\"",
                        "imports must be module paths or package names",
                    );
                }
            }

            let filename =
                filename.and_then(|t| self.template(&format!("entry.{name}.filename"), &t));

            entries.insert(
                name.clone(),
                Entry {
                    name,
                    imports,
                    depend_on,
                    filename,
                },
            );
        }

        self.dependencies(&entries);
        entries
    }

    fn dependencies(&mut self, entries: &IndexMap<String, Entry>) {
        for entry in entries.values() {
            for dependency in &entry.depend_on {
                if dependency == &entry.name {
                    self.push(ValidationError::DependencyCycle {
                        cycle: format!("{0} -> {0}", entry.name),
                    });
                } else if !entries.contains_key(dependency) {
                    self.push(ValidationError::UnknownDependency {
                        entry: entry.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        for cycle in dependency_cycles(entries) {
            self.push(ValidationError::DependencyCycle {
                cycle: cycle.join(" -> "),
            });
        }
    }

    fn output(
        &mut self,
        raw: &OutputOptions,
        entries: &IndexMap<String, Entry>,
    ) -> Option<OutputSpec> {
        if raw.path.as_os_str().is_empty() {
            self.push(ValidationError::MissingField {
                field: "output.path".to_string(),
                hint: "set the directory bundles are written to".to_string(),
            });
        }

        let filename = self.template("output.filename", &raw.filename);
        let chunk_filename = self.template("output.chunk_filename", &raw.chunk_filename);
        let asset_filename = self.template("output.asset_filename", &raw.asset_filename);

        // entries whose effective template names nothing chunk-specific collide
        // whenever another entry renders the same fixed text
        let mut fixed: IndexMap<&str, Vec<(String, &FilenameTemplate)>> = IndexMap::new();
        for (name, entry) in entries {
            let (field, template) = match (&entry.filename, &filename) {
                (Some(own), _) => (format!("entry.{name}.filename"), own),
                (None, Some(shared)) => ("output.filename".to_string(), shared),
                (None, None) => continue,
            };
            if !template.is_unique_per_chunk() {
                fixed.entry(template.as_str()).or_default().push((field, template));
            }
        }
        let mut reported = Vec::new();
        for (field, template) in fixed.into_values().flat_map(|group| group.into_iter().skip(1)) {
            if !reported.contains(&field) {
                self.ambiguous(&field, template);
                reported.push(field);
            }
        }
        if let Some(template) = &chunk_filename {
            if !template.is_unique_per_chunk() {
                self.ambiguous("output.chunk_filename", template);
            }
        }
        if let Some(template) = &asset_filename {
            if !template.is_unique_per_asset() {
                self.ambiguous("output.asset_filename", template);
            }
        }

        Some(OutputSpec {
            path: raw.path.clone(),
            filename: filename?,
            chunk_filename: chunk_filename?,
            asset_filename: asset_filename?,
            public_path: raw.public_path.clone(),
            clean: raw.clean,
        })
    }

    fn ambiguous(&mut self, field: &str, template: &FilenameTemplate) {
        self.push(ValidationError::AmbiguousFilename {
            field: field.to_string(),
            template: template.to_string(),
        });
    }

    fn rules(&mut self, raw: &[RuleOptions]) -> Vec<Rule> {
        raw.iter()
            .enumerate()
            .filter_map(|(i, rule)| self.rule(&format!("module.rules[{i}]"), rule))
            .collect()
    }

    fn rule(&mut self, field: &str, raw: &RuleOptions) -> Option<Rule> {
        let test = self.pattern(&format!("{field}.test"), &raw.test);

        let uses = raw.use_.as_ref().map(OneOrMany::to_vec).unwrap_or_default();
        let loaders = match (uses.is_empty(), &raw.loader) {
            (false, Some(loader)) => {
                self.invalid(
                    field,
                    format!("use and loader '{loader}'"),
                    "give either 'use' or 'loader', not both",
                );
                Vec::new()
            }
            (false, None) => {
                if raw.options.is_some() {
                    self.invalid(
                        format!("{field}.options"),
                        "table",
                        "with 'use', options belong to each loader",
                    );
                }
                uses.iter()
                    .enumerate()
                    .filter_map(|(i, input)| {
                        self.loader(&format!("{field}.use[{i}]"), input.loader(), input.options())
                    })
                    .collect()
            }
            (true, Some(loader)) => self
                .loader(&format!("{field}.loader"), loader, raw.options.as_ref())
                .into_iter()
                .collect(),
            (true, None) => {
                if raw.options.is_some() {
                    self.invalid(
                        format!("{field}.options"),
                        "table",
                        "options need a 'loader' to apply to",
                    );
                }
                if raw.kind.is_none() {
                    self.push(ValidationError::MissingField {
                        field: format!("{field}.use"),
                        hint: "name a loader with 'use' or 'loader', or set a module 'type'"
                            .to_string(),
                    });
                }
                Vec::new()
            }
        };

        let include = self.patterns(&format!("{field}.include"), raw.include.as_ref());
        let exclude = self.patterns(&format!("{field}.exclude"), raw.exclude.as_ref());

        Some(Rule {
            test: test?,
            loaders,
            kind: raw.kind,
            include,
            exclude,
        })
    }

    fn loader(&mut self, field: &str, name: &str, options: Option<&Value>) -> Option<LoaderRef> {
        if name.trim().is_empty() {
            self.invalid(field, "\"\"", "loader names must not be empty");
            return None;
        }
        let options = self.options(&format!("{field}.options"), options)?;
        Some(LoaderRef {
            loader: name.to_string(),
            options,
        })
    }

    fn plugins(&mut self, raw: &[PluginInput]) -> Vec<PluginRef> {
        let mut plugins = Vec::with_capacity(raw.len());

        for (i, input) in raw.iter().enumerate() {
            let field = format!("plugins[{i}]");
            let PluginOptions {
                name,
                options,
                order,
                enabled,
            } = input.clone().into_options();

            if name.trim().is_empty() {
                self.invalid(format!("{field}.name"), "\"\"", "plugin names must not be empty");
                continue;
            }
            if !PLUGIN_ORDER_RANGE.contains(&order) {
                self.invalid(
                    format!("{field}.order"),
                    order,
                    format!(
                        "use an order between {} and {}",
                        PLUGIN_ORDER_RANGE.start(),
                        PLUGIN_ORDER_RANGE.end()
                    ),
                );
            }
            let Some(options) = self.options(&format!("{field}.options"), options.as_ref()) else {
                continue;
            };

            if enabled {
                plugins.push(PluginRef {
                    name,
                    options,
                    order,
                });
            }
        }

        plugins.sort_by_key(|plugin| plugin.order);
        plugins
    }

    fn externals(&mut self, raw: &IndexMap<String, String>) -> Vec<ExternalRef> {
        let mut externals = Vec::with_capacity(raw.len());
        for (module, global) in raw {
            if module.trim().is_empty() {
                self.invalid("externals", "\"\"", "module names must not be empty");
                continue;
            }
            if !GLOBAL_NAME.is_match(global) {
                self.invalid(
                    format!("externals.{module}"),
                    format!("'{global}'"),
                    "expected a JavaScript global such as 'React' or 'window.jQuery'",
                );
                continue;
            }
            externals.push(ExternalRef {
                module: module.clone(),
                global: global.clone(),
            });
        }
        externals
    }

    fn dev_server(&mut self, raw: &DevServerOptions) -> DevServer {
        if raw.host.trim().is_empty() {
            self.invalid("dev_server.host", "\"\"", "host must not be empty");
        }
        if raw.port == Some(0) {
            self.invalid("dev_server.port", 0, "use a port between 1 and 65535");
        }
        if let Some(https) = &raw.https {
            if https.key.is_some() != https.cert.is_some() {
                let given = if https.key.is_some() { "key" } else { "cert" };
                self.invalid(
                    "dev_server.https",
                    format!("only {given}"),
                    "set both 'key' and 'cert', or neither for a self-signed certificate",
                );
            }
        }

        let mut proxies = Vec::with_capacity(raw.proxy.len());
        for (context, proxy) in &raw.proxy {
            let field = format!("dev_server.proxy.{context}");
            if !context.starts_with('/') {
                self.invalid(&field, format!("'{context}'"), "proxy paths must start with '/'");
            }
            let valid_target = PROXY_SCHEMES
                .iter()
                .any(|scheme| proxy.target.len() > scheme.len() && proxy.target.starts_with(scheme));
            if !valid_target {
                self.invalid(
                    format!("{field}.target"),
                    format!("'{}'", proxy.target),
                    "expected an http://, https://, ws:// or wss:// URL",
                );
            }
            let rewrite = proxy
                .rewrite
                .as_ref()
                .and_then(|rewrite| self.pattern(&format!("{field}.rewrite"), rewrite));

            proxies.push(Proxy {
                context: context.clone(),
                target: proxy.target.clone(),
                ws: proxy.ws,
                change_origin: proxy.change_origin,
                headers: proxy.headers.clone(),
                rewrite,
            });
        }

        DevServer {
            host: raw.host.clone(),
            port: raw.port,
            hot: raw.hot,
            live_reload: raw.live_reload,
            open: raw.open,
            history_api_fallback: raw.history_api_fallback,
            static_dir: raw.static_dir.clone(),
            headers: raw.headers.clone(),
            proxies,
            https: raw.https.clone(),
        }
    }

    fn devtool(&mut self, raw: Option<&BoolOr<String>>) -> Option<SourceMapStyle> {
        match raw {
            None | Some(BoolOr::Bool(false)) => None,
            Some(BoolOr::Bool(true)) => {
                self.invalid(
                    "devtool",
                    true,
                    "name a source map style such as 'source-map', or use false",
                );
                None
            }
            Some(BoolOr::Value(style)) if DEVTOOL.is_match(style) => {
                Some(SourceMapStyle(style.clone()))
            }
            Some(BoolOr::Value(style)) => {
                self.invalid(
                    "devtool",
                    format!("'{style}'"),
                    "expected 'eval' or [inline-|hidden-|eval-][nosources-][cheap-[module-]]source-map",
                );
                None
            }
        }
    }

    fn optimization(&mut self, raw: &OptimizationOptions, mode: Mode) -> Optimization {
        let runtime_chunk = match raw.runtime_chunk {
            None | Some(BoolOr::Bool(false)) => None,
            Some(BoolOr::Bool(true)) => Some(RuntimeChunkKind::Multiple),
            Some(BoolOr::Value(kind)) => Some(kind),
        };

        let split_chunks = match &raw.split_chunks {
            None | Some(BoolOr::Bool(true)) => {
                Some(self.split_chunks(&SplitChunksOptions::default()))
            }
            Some(BoolOr::Bool(false)) => None,
            Some(BoolOr::Value(options)) => Some(self.split_chunks(options)),
        };

        Optimization {
            minimize: raw.minimize.unwrap_or(mode.is_production()),
            runtime_chunk,
            split_chunks,
        }
    }

    fn split_chunks(&mut self, raw: &SplitChunksOptions) -> SplitChunks {
        const FIELD: &str = "optimization.split_chunks";

        if raw.min_chunks == 0 {
            self.invalid(
                format!("{FIELD}.min_chunks"),
                0,
                "at least one chunk must share a module",
            );
        }
        if raw.max_size != 0 && raw.max_size < raw.min_size {
            self.invalid(
                format!("{FIELD}.max_size"),
                raw.max_size,
                format!("must be 0 or at least min_size ({})", raw.min_size),
            );
        }

        let mut cache_groups = Vec::with_capacity(raw.cache_groups.len());
        for (key, group) in &raw.cache_groups {
            let field = format!("{FIELD}.cache_groups.{key}");
            if key.trim().is_empty() {
                self.invalid(format!("{FIELD}.cache_groups"), "\"\"", "group keys must not be empty");
                continue;
            }
            let test = group
                .test
                .as_ref()
                .and_then(|test| self.pattern(&format!("{field}.test"), test));
            let name = group.name.clone().unwrap_or_else(|| key.clone());
            if name.trim().is_empty() {
                self.invalid(format!("{field}.name"), "\"\"", "chunk names must not be empty");
            }

            cache_groups.push(CacheGroup {
                key: key.clone(),
                test,
                name,
                chunks: group.chunks.unwrap_or(raw.chunks),
                priority: group.priority,
                reuse_existing_chunk: group.reuse_existing_chunk,
                enforce: group.enforce,
            });
        }

        SplitChunks {
            chunks: raw.chunks,
            min_size: raw.min_size,
            max_size: raw.max_size,
            min_chunks: raw.min_chunks,
            cache_groups,
        }
    }

    fn cache(&mut self, raw: Option<&BoolOr<CacheOptions>>) -> Option<CacheSpec> {
        match raw {
            None | Some(BoolOr::Bool(false)) => None,
            Some(BoolOr::Bool(true)) => Some(CacheSpec::Memory),
            Some(BoolOr::Value(options)) => match options.kind {
                CacheType::Memory => {
                    if let Some(directory) = &options.cache_directory {
                        self.invalid(
                            "cache.cache_directory",
                            directory.display(),
                            "only the filesystem cache has a directory",
                        );
                    }
                    if let Some(name) = &options.name {
                        self.invalid(
                            "cache.name",
                            format!("'{name}'"),
                            "only the filesystem cache is named",
                        );
                    }
                    Some(CacheSpec::Memory)
                }
                CacheType::Filesystem => {
                    if options
                        .cache_directory
                        .as_ref()
                        .is_some_and(|dir| dir.as_os_str().is_empty())
                    {
                        self.invalid("cache.cache_directory", "\"\"", "directory must not be empty");
                    }
                    Some(CacheSpec::Filesystem {
                        directory: options.cache_directory.clone(),
                        name: options.name.clone(),
                    })
                }
            },
        }
    }

    fn resolve(&mut self, raw: &ResolveOptions) -> ResolveSpec {
        let mut seen = HashSet::new();
        for (i, extension) in raw.extensions.iter().enumerate() {
            let field = format!("resolve.extensions[{i}]");
            if extension.len() < 2 || !extension.starts_with('.') {
                self.invalid(field, format!("'{extension}'"), "extensions start with '.', e.g. '.js'");
            } else if !seen.insert(extension.as_str()) {
                self.invalid(field, format!("'{extension}'"), "extension is listed more than once");
            }
        }

        for (alias, target) in &raw.alias {
            if alias.trim().is_empty() {
                self.invalid("resolve.alias", "\"\"", "alias names must not be empty");
            } else if target.trim().is_empty() {
                self.invalid(format!("resolve.alias.{alias}"), "\"\"", "alias targets must not be empty");
            }
        }

        ResolveSpec {
            extensions: raw.extensions.clone(),
            alias: raw.alias.clone(),
        }
    }
}

/// Every `depend_on` cycle longer than one entry, as the names along it.
///
/// Self references and unknown names are reported elsewhere and skipped here.
fn dependency_cycles(entries: &IndexMap<String, Entry>) -> Vec<Vec<String>> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        Active,
        Done,
    }

    fn visit(
        index: usize,
        entries: &IndexMap<String, Entry>,
        marks: &mut [Mark],
        stack: &mut Vec<usize>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        marks[index] = Mark::Active;
        stack.push(index);

        let entry = &entries[index];
        for dependency in &entry.depend_on {
            if dependency == &entry.name {
                continue;
            }
            let Some(next) = entries.get_index_of(dependency) else {
                continue;
            };
            match marks[next] {
                Mark::Unvisited => visit(next, entries, marks, stack, cycles),
                Mark::Active => {
                    let start = stack.iter().position(|&i| i == next).unwrap_or(0);
                    let mut cycle: Vec<String> = stack[start..]
                        .iter()
                        .map(|&i| entries[i].name.clone())
                        .collect();
                    cycle.push(entries[next].name.clone());
                    cycles.push(cycle);
                }
                Mark::Done => {}
            }
        }

        stack.pop();
        marks[index] = Mark::Done;
    }

    let mut marks = vec![Mark::Unvisited; entries.len()];
    let mut stack = Vec::new();
    let mut cycles = Vec::new();
    for index in 0..entries.len() {
        if marks[index] == Mark::Unvisited {
            visit(index, entries, &mut marks, &mut stack, &mut cycles);
        }
    }
    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateError;
    use serde_json::json;

    fn normalize(value: Value) -> Result<NormalizedConfig, ValidationErrors> {
        NormalizedConfig::from_raw(RawConfig::from_value(value).unwrap())
    }

    fn errors(value: Value) -> Vec<ValidationError> {
        normalize(value).unwrap_err().into_vec()
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = normalize(json!({ "entry": "./src/index.js" })).unwrap();

        assert_eq!(config.mode(), Mode::Production);
        assert_eq!(config.entries().len(), 1);
        assert_eq!(config.entry("main").unwrap().imports, vec!["./src/index.js"]);
        assert_eq!(config.output().path, PathBuf::from("dist"));
        assert_eq!(config.output().filename.as_str(), "[name].js");
        assert_eq!(config.output().public_path, "auto");
        assert!(config.optimization().minimize);
        assert_eq!(
            config.optimization().split_chunks.as_ref().map(|s| s.chunks),
            Some(ChunksKind::Async)
        );
        assert!(config.devtool().is_none());
        assert!(config.cache().is_none());
    }

    #[test]
    fn missing_entry_is_reported() {
        let errors = errors(json!({}));
        assert!(matches!(
            &errors[..],
            [ValidationError::MissingField { field, .. }] if field == "entry"
        ));
    }

    #[test]
    fn empty_entries_are_reported() {
        assert_eq!(errors(json!({ "entry": {} })), vec![ValidationError::NoEntries]);
        assert_eq!(errors(json!({ "entry": [] })), vec![ValidationError::NoEntries]);
    }

    #[test]
    fn duplicate_descriptor_names_are_reported_once() {
        let errors = errors(json!({
            "entry": [
                { "name": "app", "import": "./a.js" },
                { "name": "app", "import": "./b.js" },
                { "name": "app", "import": "./c.js" }
            ]
        }));
        assert_eq!(errors, vec![ValidationError::DuplicateEntry { name: "app".into() }]);
    }

    #[test]
    fn entry_bodies_are_checked() {
        let errors = errors(json!({
            "entry": { " padded ": "./a.js", "empty": [], "blank": [""] }
        }));
        assert!(matches!(errors[0], ValidationError::InvalidEntryName { .. }));
        assert_eq!(errors[1], ValidationError::EmptyEntry { name: "empty".into() });
        assert!(matches!(
            &errors[2],
            ValidationError::InvalidValue { field, .. } if field == "entry.blank.import"
        ));
    }

    #[test]
    fn depend_on_must_name_declared_entries() {
        let errors = errors(json!({
            "entry": { "app": { "import": "./a.js", "depend_on": ["shared", "app"] } }
        }));
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownDependency {
                    entry: "app".into(),
                    dependency: "shared".into()
                },
                ValidationError::DependencyCycle {
                    cycle: "app -> app".into()
                },
            ]
        );
    }

    #[test]
    fn depend_on_cycles_are_detected() {
        let errors = errors(json!({
            "entry": {
                "a": { "import": "./a.js", "depend_on": "b" },
                "b": { "import": "./b.js", "depend_on": "c" },
                "c": { "import": "./c.js", "depend_on": "a" },
                "d": { "import": "./d.js", "depend_on": "a" }
            }
        }));
        assert_eq!(
            errors,
            vec![ValidationError::DependencyCycle {
                cycle: "a -> b -> c -> a".into()
            }]
        );
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let errors = errors(json!({
            "entry": "./a.js",
            "output": { "filename": "[name].[chunkHash].js" }
        }));
        assert!(matches!(
            &errors[..],
            [ValidationError::InvalidTemplate { field, source: TemplateError::UnknownPlaceholder(p), .. }]
                if field == "output.filename" && p == "chunkHash"
        ));
    }

    #[test]
    fn fixed_filename_is_ambiguous_with_several_entries() {
        let single = normalize(json!({
            "entry": "./a.js",
            "output": { "filename": "bundle.js" }
        }));
        assert!(single.is_ok());

        let errors = errors(json!({
            "entry": { "a": "./a.js", "b": "./b.js" },
            "output": { "filename": "bundle.js" }
        }));
        assert_eq!(
            errors,
            vec![ValidationError::AmbiguousFilename {
                field: "output.filename".into(),
                template: "bundle.js".into()
            }]
        );
    }

    #[test]
    fn fixed_entry_filenames_collide() {
        let overrides = errors(json!({
            "entry": {
                "a": { "import": "./a.js", "filename": "bundle.js" },
                "b": { "import": "./b.js", "filename": "bundle.js" },
                "c": { "import": "./c.js", "filename": "c.js" }
            }
        }));
        assert_eq!(
            overrides,
            vec![ValidationError::AmbiguousFilename {
                field: "entry.b.filename".into(),
                template: "bundle.js".into()
            }]
        );

        let mixed = errors(json!({
            "entry": {
                "a": "./a.js",
                "b": { "import": "./b.js", "filename": "bundle.js" }
            },
            "output": { "filename": "bundle.js" }
        }));
        assert_eq!(
            mixed,
            vec![ValidationError::AmbiguousFilename {
                field: "entry.b.filename".into(),
                template: "bundle.js".into()
            }]
        );
    }

    #[test]
    fn distinct_fixed_entry_filenames_are_fine() {
        let config = normalize(json!({
            "entry": {
                "a": { "import": "./a.js", "filename": "a.js" },
                "b": { "import": "./b.js", "filename": "b.js" }
            },
            "output": { "filename": "bundle.js" }
        }));
        assert!(config.is_ok(), "{config:?}");
    }

    #[test]
    fn every_problem_is_reported_together() {
        let errors = errors(json!({
            "entry": { "app": "./a.js" },
            "output": { "filename": "[nme].js", "chunk_filename": "chunk.js" },
            "module": { "rules": [ { "test": "(", "loader": "babel-loader" } ] },
            "externals": { "react": "not a global" },
            "devtool": "best-source-map",
            "dev_server": { "port": 0 }
        }));
        assert_eq!(errors.len(), 6, "{errors:?}");
    }

    #[test]
    fn rules_compile_patterns_and_loaders() {
        let config = normalize(json!({
            "entry": "./a.js",
            "module": {
                "rules": [
                    { "test": "\\.jsx?$", "loader": "babel-loader", "options": { "cacheDirectory": true }, "exclude": "/node_modules/" },
                    { "test": "/\\.css$/i", "use": ["style-loader", { "loader": "css-loader", "options": { "modules": true } }] },
                    { "test": "\\.png$", "type": "asset/resource" }
                ]
            }
        }))
        .unwrap();

        let rules = config.rules();
        assert_eq!(rules[0].loaders[0].loader, "babel-loader");
        assert_eq!(rules[0].loaders[0].options["cacheDirectory"], json!(true));
        assert!(rules[0].matches("src/app.jsx"));
        assert!(!rules[0].matches("node_modules/react/index.js"));
        assert_eq!(rules[1].loaders.len(), 2);
        assert!(rules[1].matches("THEME.CSS"));
        assert_eq!(rules[2].kind, Some(AssetType::Resource));
        assert_eq!(config.rules_for("logo.png").count(), 1);
    }

    #[test]
    fn rule_loader_shape_is_checked() {
        let errors = errors(json!({
            "entry": "./a.js",
            "module": {
                "rules": [
                    { "test": "a", "use": "x-loader", "loader": "y-loader" },
                    { "test": "b" },
                    { "test": "c", "loader": "z-loader", "options": 3 }
                ]
            }
        }));
        let fields: Vec<_> = errors
            .iter()
            .map(|e| match e {
                ValidationError::InvalidValue { field, .. } => field.as_str(),
                ValidationError::MissingField { field, .. } => field.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(
            fields,
            vec!["module.rules[0]", "module.rules[1].use", "module.rules[2].loader.options"]
        );
    }

    #[test]
    fn plugins_are_filtered_and_ordered() {
        let config = normalize(json!({
            "entry": "./a.js",
            "plugins": [
                { "name": "late", "order": 10 },
                "html",
                { "name": "off", "enabled": false },
                { "name": "early", "order": -5, "options": { "x": 1 } }
            ]
        }))
        .unwrap();

        let names: Vec<_> = config.plugins().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["early", "html", "late"]);
        assert_eq!(config.plugins()[0].options["x"], json!(1));
    }

    #[test]
    fn plugin_order_and_options_are_checked() {
        let errors = errors(json!({
            "entry": "./a.js",
            "plugins": [ { "name": "a", "order": 5000 }, { "name": "b", "options": [1] } ]
        }));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn externals_keep_declaration_order() {
        let config = normalize(json!({
            "entry": "./a.js",
            "externals": { "react": "React", "jquery": "window.jQuery", "lodash": "_" }
        }))
        .unwrap();
        let modules: Vec<_> = config.externals().iter().map(|e| e.module.as_str()).collect();
        assert_eq!(modules, vec!["react", "jquery", "lodash"]);
        assert_eq!(config.external("jquery").unwrap().global, "window.jQuery");
    }

    #[test]
    fn dev_server_is_checked() {
        let errors = errors(json!({
            "entry": "./a.js",
            "dev_server": {
                "host": "",
                "proxy": { "api": { "target": "localhost:8080" } },
                "https": { "key": "key.pem" }
            }
        }));
        assert_eq!(errors.len(), 4, "{errors:?}");
    }

    #[test]
    fn dev_server_defaults() {
        let config = normalize(json!({
            "entry": "./a.js",
            "dev_server": { "proxy": { "/api": { "target": "http://localhost:8080", "rewrite": "^/api" } } }
        }))
        .unwrap();
        let server = config.dev_server().unwrap();
        assert_eq!(server.host, "localhost");
        assert!(server.hot && server.live_reload);
        assert_eq!(server.proxies[0].context, "/api");
        assert!(server.proxies[0].rewrite.as_ref().unwrap().is_match("/api/users"));
    }

    #[test]
    fn devtool_styles() {
        for style in ["eval", "source-map", "eval-cheap-module-source-map", "hidden-nosources-source-map"] {
            let config = normalize(json!({ "entry": "./a.js", "devtool": style })).unwrap();
            assert_eq!(config.devtool().unwrap().as_str(), style);
        }
        assert!(normalize(json!({ "entry": "./a.js", "devtool": false })).unwrap().devtool().is_none());
        assert_eq!(errors(json!({ "entry": "./a.js", "devtool": true })).len(), 1);
        assert_eq!(errors(json!({ "entry": "./a.js", "devtool": "cheap-eval-source-map" })).len(), 1);
    }

    #[test]
    fn optimization_follows_mode() {
        let config = normalize(json!({
            "entry": "./a.js",
            "mode": "development",
            "optimization": { "split_chunks": false, "runtime_chunk": true }
        }))
        .unwrap();
        assert!(!config.optimization().minimize);
        assert!(config.optimization().split_chunks.is_none());
        assert_eq!(config.optimization().runtime_chunk, Some(RuntimeChunkKind::Multiple));
    }

    #[test]
    fn split_chunk_limits_are_checked() {
        let errors = errors(json!({
            "entry": "./a.js",
            "optimization": {
                "split_chunks": {
                    "min_size": 1000, "max_size": 10, "min_chunks": 0,
                    "cache_groups": { "vendors": { "test": "[" } }
                }
            }
        }));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn cache_groups_inherit_chunks_and_name() {
        let config = normalize(json!({
            "entry": "./a.js",
            "optimization": { "split_chunks": { "chunks": "all", "cache_groups": { "vendors": { "test": "/node_modules/" } } } }
        }))
        .unwrap();
        let group = &config.optimization().split_chunks.as_ref().unwrap().cache_groups[0];
        assert_eq!(group.name, "vendors");
        assert_eq!(group.chunks, ChunksKind::All);
    }

    #[test]
    fn cache_variants() {
        let memory = normalize(json!({ "entry": "./a.js", "cache": true })).unwrap();
        assert_eq!(memory.cache(), Some(&CacheSpec::Memory));

        let fs = normalize(json!({
            "entry": "./a.js",
            "cache": { "type": "filesystem", "cache_directory": ".cache" }
        }))
        .unwrap();
        assert!(matches!(fs.cache(), Some(CacheSpec::Filesystem { directory: Some(_), .. })));

        assert_eq!(
            errors(json!({ "entry": "./a.js", "cache": { "type": "memory", "name": "x" } })).len(),
            1
        );
    }

    #[test]
    fn resolve_extensions_are_checked() {
        let errors = errors(json!({
            "entry": "./a.js",
            "resolve": { "extensions": [".js", "ts", ".js"], "alias": { "@": "" } }
        }));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn to_raw_round_trips() {
        let config = NormalizedConfig::from_raw(RawConfig::example()).unwrap();
        let again = NormalizedConfig::from_raw(config.to_raw()).unwrap();
        assert_eq!(config, again);
    }

    #[test]
    fn serializes_in_raw_shape() {
        let config = normalize(json!({ "entry": "./a.js" })).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["entry"], json!({ "main": "./a.js" }));
        assert_eq!(value["output"]["filename"], "[name].js");
        assert_eq!(value["optimization"]["minimize"], json!(true));
    }
}
