//! POM parsing: dependency declarations, dependency management, parent
//! inheritance, property interpolation, BOM imports.

use std::collections::BTreeMap;

use depot_core::coordinate::{Coordinate, MediationKey};
use depot_core::dependency::{Exclusion, ManagedDependency};
use depot_core::scope::Scope;
use depot_util::errors::DepotError;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Longest `${...}` substitution chain followed before giving up.
const MAX_INTERPOLATION_PASSES: usize = 20;

/// A parsed POM (Project Object Model) file.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,

    pub parent: Option<ParentRef>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<PomDependency>,
    pub dependency_management: Vec<PomDependency>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone, Default)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl ParentRef {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(&self.group_id, &self.artifact_id, &self.version).with_type("pom")
    }
}

/// A dependency declared in a POM file.
#[derive(Debug, Clone, Default)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
    pub classifier: Option<String>,
    pub type_: Option<String>,
    pub exclusions: Vec<PomExclusion>,
    /// Declared by a parent POM rather than this one.
    pub inherited: bool,
}

impl PomDependency {
    pub fn mediation_key(&self) -> MediationKey {
        MediationKey::new(
            &self.group_id,
            &self.artifact_id,
            self.type_.as_deref(),
            self.classifier.as_deref(),
        )
    }

    /// Parsed scope; unknown or missing scopes read as `compile`.
    pub fn parsed_scope(&self) -> Scope {
        match self.scope.as_deref() {
            None => Scope::Compile,
            Some(s) => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    dependency = %self.mediation_key(),
                    scope = s,
                    "unknown scope, treating as compile"
                );
                Scope::Compile
            }),
        }
    }

    pub fn is_bom_import(&self) -> bool {
        self.scope.as_deref() == Some("import") && self.type_.as_deref() == Some("pom")
    }
}

/// An exclusion within a dependency declaration.
#[derive(Debug, Clone, Default)]
pub struct PomExclusion {
    pub group_id: String,
    pub artifact_id: Option<String>,
}

impl PomExclusion {
    pub fn to_exclusion(&self) -> Exclusion {
        Exclusion::new(
            &self.group_id,
            self.artifact_id.as_deref().unwrap_or(depot_core::dependency::WILDCARD),
        )
    }
}

impl Pom {
    /// Effective group ID (falls back to parent).
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.group_id.as_str()))
    }

    /// Effective version (falls back to parent).
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.version.as_str()))
    }

    /// The coordinate this POM describes, if it names itself completely.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(
            self.effective_group_id()?,
            self.artifact_id.as_deref()?,
            self.effective_version()?,
        ))
    }

    /// Resolve `${property}` references in a string using POM properties
    /// and built-in project variables. Unknown properties are left in place.
    pub fn interpolate(&self, input: &str) -> String {
        let mut result = input.to_string();
        for _ in 0..MAX_INTERPOLATION_PASSES {
            if !result.contains("${") {
                break;
            }
            let mut out = String::with_capacity(result.len());
            let mut rest = result.as_str();
            while let Some(start) = rest.find("${") {
                let Some(len) = rest[start..].find('}') else {
                    break;
                };
                let key = &rest[start + 2..start + len];
                out.push_str(&rest[..start]);
                match self.resolve_property(key) {
                    Some(val) => out.push_str(&val),
                    None => out.push_str(&rest[start..start + len + 1]),
                }
                rest = &rest[start + len + 1..];
            }
            out.push_str(rest);
            if out == result {
                break;
            }
            result = out;
        }
        result
    }

    fn resolve_property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" | "pom.groupId" => self.effective_group_id().map(|s| s.to_string()),
            "project.artifactId" | "pom.artifactId" => self.artifact_id.clone(),
            "project.version" | "pom.version" => self.effective_version().map(|s| s.to_string()),
            "project.packaging" | "pom.packaging" => self.packaging.clone(),
            "project.parent.groupId" => self.parent.as_ref().map(|p| p.group_id.clone()),
            "project.parent.version" => self.parent.as_ref().map(|p| p.version.clone()),
            _ => self.properties.get(key).cloned(),
        }
    }

    /// Interpolate all property references in dependencies and dependency management.
    pub fn resolve_properties(&mut self) {
        let snapshot = self.clone();
        let deps = self
            .dependencies
            .iter_mut()
            .chain(self.dependency_management.iter_mut());
        for dep in deps {
            dep.group_id = snapshot.interpolate(&dep.group_id);
            dep.artifact_id = snapshot.interpolate(&dep.artifact_id);
            dep.version = dep.version.as_deref().map(|v| snapshot.interpolate(v));
            dep.scope = dep.scope.as_deref().map(|s| snapshot.interpolate(s));
            dep.classifier = dep.classifier.as_deref().map(|c| snapshot.interpolate(c));
        }
    }

    /// Merge a parent POM into this one: properties, identity fallbacks,
    /// dependency management, and the parent's own dependencies (marked
    /// `inherited`). Declarations in this POM take precedence.
    pub fn apply_parent(&mut self, parent: &Pom) {
        for (k, v) in &parent.properties {
            self.properties
                .entry(k.clone())
                .or_insert_with(|| v.clone());
        }
        if self.group_id.is_none() {
            self.group_id = parent.effective_group_id().map(|s| s.to_string());
        }
        if self.version.is_none() {
            self.version = parent.effective_version().map(|s| s.to_string());
        }
        for dm in &parent.dependency_management {
            let key = dm.mediation_key();
            if !self
                .dependency_management
                .iter()
                .any(|d| d.mediation_key() == key)
            {
                self.dependency_management.push(dm.clone());
            }
        }
        for dep in &parent.dependencies {
            let key = dep.mediation_key();
            if !self.dependencies.iter().any(|d| d.mediation_key() == key) {
                self.dependencies.push(PomDependency {
                    inherited: true,
                    ..dep.clone()
                });
            }
        }
    }

    /// Merge the dependency management of an imported BOM.
    pub fn import_management(&mut self, bom: &Pom) {
        for dm in &bom.dependency_management {
            let key = dm.mediation_key();
            if !self
                .dependency_management
                .iter()
                .any(|d| !d.is_bom_import() && d.mediation_key() == key)
            {
                self.dependency_management.push(dm.clone());
            }
        }
    }

    /// Look up a managed entry for a dependency of this POM.
    pub fn managed_version(&self, key: &MediationKey) -> Option<&str> {
        self.dependency_management
            .iter()
            .filter(|d| !d.is_bom_import())
            .find(|d| &d.mediation_key() == key)
            .and_then(|d| d.version.as_deref())
    }

    /// Dependency management as graph-level entries (BOM imports omitted).
    pub fn managed(&self) -> Vec<ManagedDependency> {
        self.dependency_management
            .iter()
            .filter(|d| !d.is_bom_import())
            .map(|d| ManagedDependency {
                key: d.mediation_key(),
                version: d.version.clone(),
                scope: d.scope.as_deref().and_then(|s| s.parse().ok()),
            })
            .collect()
    }

    /// BOM imports from dependency management
    /// (entries with `scope = "import"` and `type = "pom"`).
    pub fn bom_imports(&self) -> Vec<&PomDependency> {
        self.dependency_management
            .iter()
            .filter(|d| d.is_bom_import())
            .collect()
    }
}

/// Parse a POM XML string into a `Pom` struct.
pub fn parse_pom(xml: &str) -> Result<Pom, DepotError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pom = Pom::default();
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();

    let mut current_dep: Option<PomDependency> = None;
    let mut current_exclusion: Option<PomExclusion> = None;
    let mut current_parent: Option<ParentRef> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                text.clear();

                match path_context(&path).as_str() {
                    DEPENDENCY | MANAGED_DEPENDENCY => current_dep = Some(PomDependency::default()),
                    ctx if ctx.ends_with(">exclusion") && current_dep.is_some() => {
                        current_exclusion = Some(PomExclusion::default());
                    }
                    "project>parent" => current_parent = Some(ParentRef::default()),
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                text = e
                    .unescape()
                    .map_err(|err| DepotError::Pom {
                        message: format!("invalid text: {err}"),
                    })?
                    .to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path_context(&path);
                let leaf = path.last().map(|s| s.as_str()).unwrap_or_default();
                let depth = path.len();

                // <project><properties><key>value</key></properties>
                if depth == 3 && path[1] == "properties" {
                    pom.properties.insert(leaf.to_string(), text.clone());
                }

                if let Some(ref mut excl) = current_exclusion {
                    match leaf {
                        "groupId" => excl.group_id = text.clone(),
                        "artifactId" => excl.artifact_id = Some(text.clone()),
                        _ => {}
                    }
                    if ctx.ends_with(">exclusion") {
                        if let (Some(excl), Some(dep)) = (current_exclusion.take(), &mut current_dep)
                        {
                            dep.exclusions.push(excl);
                        }
                    }
                } else if let Some(ref mut dep) = current_dep {
                    if ctx.ends_with(&format!(">dependency>{leaf}")) {
                        match leaf {
                            "groupId" => dep.group_id = text.clone(),
                            "artifactId" => dep.artifact_id = text.clone(),
                            "version" => dep.version = Some(text.clone()),
                            "scope" => dep.scope = Some(text.clone()),
                            "optional" => dep.optional = text.trim() == "true",
                            "classifier" => dep.classifier = Some(text.clone()),
                            "type" => dep.type_ = Some(text.clone()),
                            _ => {}
                        }
                    }
                    if ctx == DEPENDENCY || ctx == MANAGED_DEPENDENCY {
                        if let Some(dep) = current_dep.take() {
                            if ctx == MANAGED_DEPENDENCY {
                                pom.dependency_management.push(dep);
                            } else {
                                pom.dependencies.push(dep);
                            }
                        }
                    }
                }

                if let Some(ref mut parent) = current_parent {
                    match ctx.as_str() {
                        "project>parent>groupId" => parent.group_id = text.clone(),
                        "project>parent>artifactId" => parent.artifact_id = text.clone(),
                        "project>parent>version" => parent.version = text.clone(),
                        "project>parent" => pom.parent = current_parent.take(),
                        _ => {}
                    }
                }

                if depth == 2 {
                    match leaf {
                        "groupId" => pom.group_id = Some(text.clone()),
                        "artifactId" => pom.artifact_id = Some(text.clone()),
                        "version" => pom.version = Some(text.clone()),
                        "packaging" => pom.packaging = Some(text.clone()),
                        _ => {}
                    }
                }

                path.pop();
                text.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DepotError::Pom {
                    message: format!(
                        "malformed XML at position {}: {e}",
                        reader.buffer_position()
                    ),
                });
            }
            _ => {}
        }
    }

    if !path.is_empty() {
        return Err(DepotError::Pom {
            message: format!("unclosed element <{}>", path.join(">")),
        });
    }
    if pom.artifact_id.is_none() {
        return Err(DepotError::Pom {
            message: "missing <artifactId>".to_string(),
        });
    }

    Ok(pom)
}

const DEPENDENCY: &str = "project>dependencies>dependency";
const MANAGED_DEPENDENCY: &str = "project>dependencyManagement>dependencies>dependency";

/// Build a context string from the current XML path for matching.
fn path_context(path: &[String]) -> String {
    path.join(">")
}
