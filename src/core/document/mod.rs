//! `.travis.yml` editing.
//!
//! Loads the configuration into an insertion-ordered tree, splices one
//! encrypted value into it, and writes it back in block style. Keys that
//! are not on the insertion path keep their values and their order, so
//! the resulting diff only touches the `secure` entry.

mod map;
mod node;
mod target;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::core::constants::SECURE_KEY;
use crate::error::{ConfigError, Result};

pub use map::OrderedMap;
pub use node::Node;
pub use target::{InsertionTarget, Placement};

/// An in-memory CI configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    root: OrderedMap<Node>,
}

impl ConfigDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from YAML text.
    ///
    /// Empty input (or input holding only comments) yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the text is not valid YAML, or
    /// `ConfigError::Shape` if the top level is not a mapping.
    pub fn parse(source: &str) -> Result<Self> {
        if is_blank(source) {
            return Ok(Self::new());
        }

        match serde_yaml::from_str::<Node>(source).map_err(ConfigError::Parse)? {
            Node::Null => Ok(Self::new()),
            Node::Mapping(root) => Ok(Self { root }),
            other => Err(ConfigError::Shape {
                path: "<root>".to_string(),
                found: other.kind(),
            }
            .into()),
        }
    }

    /// Load a document from disk.
    ///
    /// A missing file is an empty document, so the first encrypted value can
    /// be written to a repository that has no CI configuration yet.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file exists but cannot be read,
    /// or any error from [`ConfigDocument::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");

        if !path.exists() {
            debug!("configuration not found, starting empty");
            return Ok(Self::new());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let doc = Self::parse(&contents)?;
        debug!(keys = doc.root.len(), "configuration loaded");

        Ok(doc)
    }

    /// Serialize the document as block-style YAML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if the emitter fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.root)
            .map_err(|e| ConfigError::Serialize(e.to_string()).into())
    }

    /// Write the document to `path`.
    ///
    /// The YAML is fully rendered first, then written to a temporary file in
    /// the same directory and renamed over `path`. An error at any point
    /// leaves the previous file untouched. A symlinked `path` is resolved
    /// first so the link survives and its target is replaced.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` or `ConfigError::WriteFile`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = resolve_target(path.as_ref())?;
        let path = path.as_path();
        let contents = self.to_yaml()?;
        debug!(path = %path.display(), bytes = contents.len(), "saving configuration");

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(ConfigError::WriteFile)?;
        tmp.write_all(contents.as_bytes())
            .map_err(ConfigError::WriteFile)?;
        tmp.flush().map_err(ConfigError::WriteFile)?;

        match std::fs::metadata(path) {
            Ok(meta) => tmp
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(ConfigError::WriteFile)?,
            #[cfg(unix)]
            Err(_) => {
                use std::os::unix::fs::PermissionsExt;
                tmp.as_file()
                    .set_permissions(std::fs::Permissions::from_mode(0o644))
                    .map_err(ConfigError::WriteFile)?
            }
            #[cfg(not(unix))]
            Err(_) => {}
        }

        tmp.persist(path)
            .map_err(|e| ConfigError::WriteFile(e.error))?;

        Ok(())
    }

    /// Set the `secure` value at `target` to `ciphertext`.
    ///
    /// Missing intermediate mappings are created at the end of their parent;
    /// intermediate keys holding `null` are treated as missing. Nothing else
    /// in the document changes.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Shape` if an intermediate key holds a value that
    /// is not a mapping. The document is left unchanged in that case.
    pub fn insert_secure_value(
        &mut self,
        target: &InsertionTarget,
        ciphertext: &str,
    ) -> Result<Placement> {
        self.check_shape(target)?;

        let value = Node::from(ciphertext);
        let placement = match target {
            InsertionTarget::Password => {
                let password = child_mapping(&mut self.root, "password", "password")?;
                set_secure(password, value)
            }
            InsertionTarget::Deploy => {
                let deploy = child_mapping(&mut self.root, "deploy", "deploy")?;
                let password = child_mapping(deploy, "password", "deploy.password")?;
                set_secure(password, value)
            }
            InsertionTarget::Env => {
                let env = child_mapping(&mut self.root, "env", "env")?;
                insert_env_global(env, value)?
            }
            InsertionTarget::EnvVar(name) => {
                let env = child_mapping(&mut self.root, "env", "env")?;
                insert_env_var(env, name, value)?
            }
        };

        if placement == Placement::Appended {
            warn!(
                slot = %target,
                "env.global has no entry to update, appended a new one"
            );
        } else {
            debug!(slot = %target, ?placement, "secure value set");
        }

        Ok(placement)
    }

    /// Top-level mapping.
    pub fn root(&self) -> &OrderedMap<Node> {
        &self.root
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys()
    }

    /// Follow `path` through nested mappings.
    pub fn get(&self, path: &[&str]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let mut node = self.root.get(first)?;
        for key in rest {
            node = node.get(key)?;
        }
        Some(node)
    }

    /// Walk `target`'s intermediate keys without mutating, failing on the
    /// first one that holds a non-mapping value.
    fn check_shape(&self, target: &InsertionTarget) -> Result<()> {
        let path: Vec<&str> = match target {
            InsertionTarget::Password => vec!["password"],
            InsertionTarget::Deploy => vec!["deploy", "password"],
            InsertionTarget::Env => vec!["env", "global"],
            InsertionTarget::EnvVar(name) => vec!["env", "global", name.as_str()],
        };

        let mut current = &self.root;
        for (depth, key) in path.iter().enumerate() {
            match current.get(key) {
                None | Some(Node::Null) => return Ok(()),
                Some(Node::Mapping(map)) => current = map,
                // A list is only valid as `env.global`; its entries are
                // resolved during insertion.
                Some(Node::Sequence(_)) if depth == 1 && path[0] == "env" => return Ok(()),
                Some(other) => {
                    return Err(ConfigError::Shape {
                        path: path[..=depth].join("."),
                        found: other.kind(),
                    }
                    .into())
                }
            }
        }

        Ok(())
    }
}

impl std::str::FromStr for ConfigDocument {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Follow symlinks to the file a rename should replace.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match std::fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(ConfigError::WriteFile(e).into()),
    }
}

fn is_blank(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Turn `slot` into a mapping if it is null and borrow it as one.
fn mapping_slot<'a>(slot: &'a mut Node, path: &str) -> Result<&'a mut OrderedMap<Node>> {
    if slot.is_null() {
        *slot = Node::Mapping(OrderedMap::new());
    }

    match slot {
        Node::Mapping(map) => Ok(map),
        other => Err(ConfigError::Shape {
            path: path.to_string(),
            found: other.kind(),
        }
        .into()),
    }
}

/// Mapping stored under `key`, created at the end of `parent` if absent.
fn child_mapping<'a>(
    parent: &'a mut OrderedMap<Node>,
    key: &str,
    path: &str,
) -> Result<&'a mut OrderedMap<Node>> {
    mapping_slot(parent.get_or_insert_with(key, || Node::Null), path)
}

fn set_secure(map: &mut OrderedMap<Node>, value: Node) -> Placement {
    match map.insert(SECURE_KEY, value) {
        Some(_) => Placement::Overwritten,
        None => Placement::Inserted,
    }
}

fn secure_entry(value: Node) -> Node {
    Node::Mapping([(SECURE_KEY, value)].into_iter().collect())
}

fn insert_env_global(env: &mut OrderedMap<Node>, value: Node) -> Result<Placement> {
    let global = env.get_or_insert_with("global", || Node::Null);

    if let Node::Sequence(items) = global {
        let existing = items.iter_mut().find_map(|item| match item {
            Node::Mapping(map) if map.contains_key(SECURE_KEY) => Some(map),
            _ => None,
        });

        return Ok(match existing {
            Some(map) => set_secure(map, value),
            None => {
                items.push(secure_entry(value));
                Placement::Appended
            }
        });
    }

    let global = mapping_slot(global, "env.global")?;
    Ok(set_secure(global, value))
}

fn insert_env_var(env: &mut OrderedMap<Node>, name: &str, value: Node) -> Result<Placement> {
    let global = env.get_or_insert_with("global", || Node::Null);

    if let Node::Sequence(items) = global {
        let existing = items.iter_mut().find_map(|item| match item {
            Node::Mapping(map) => match map.get_mut(name) {
                Some(Node::Mapping(var)) => Some(var),
                _ => None,
            },
            _ => None,
        });

        return Ok(match existing {
            Some(var) => set_secure(var, value),
            None => {
                let entry = [(name, secure_entry(value))].into_iter().collect();
                items.push(Node::Mapping(entry));
                Placement::Appended
            }
        });
    }

    let global = mapping_slot(global, "env.global")?;
    let var = child_mapping(global, name, &format!("env.global.{}", name))?;
    Ok(set_secure(var, value))
}
