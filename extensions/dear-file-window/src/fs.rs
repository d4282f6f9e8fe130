use std::path::Path;
use std::time::SystemTime;

/// Minimal file metadata used by the file window.
#[derive(Clone, Debug)]
pub struct FsMetadata {
    /// Whether the path refers to a regular file (symlinks are followed).
    pub is_file: bool,
    /// Whether the path refers to a directory (symlinks are followed).
    pub is_dir: bool,
}

/// Directory entry returned by [`FileSystem::read_dir`].
#[derive(Clone, Debug)]
pub struct FsEntry {
    /// Base name (no parent path)
    pub name: String,
    /// Whether this entry is a regular file (symlinks are followed).
    pub is_file: bool,
    /// File size in bytes.
    pub size: Option<u64>,
    /// Last modified timestamp (when available).
    pub modified: Option<SystemTime>,
}

/// Source of directory listings.
///
/// The window only ever lists one directory and checks one path, so this is
/// deliberately small. Hosts with virtual file systems can implement it.
pub trait FileSystem {
    /// List entries of a directory.
    ///
    /// Entries whose metadata cannot be read, or whose name is not valid
    /// UTF-8, are left out.
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>>;
    /// Fetch minimal metadata for a path.
    fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata>;
}

/// Default filesystem implementation using `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>> {
        let mut out = Vec::new();
        for e in std::fs::read_dir(dir)? {
            let Ok(e) = e else {
                continue;
            };
            // A lossy name would confirm a path that does not exist.
            let Ok(name) = e.file_name().into_string() else {
                continue;
            };
            // `DirEntry::metadata` does not traverse symlinks; a linked file
            // should still show up as a file.
            let Ok(md) = std::fs::metadata(e.path()) else {
                continue;
            };
            out.push(FsEntry {
                name,
                is_file: md.is_file(),
                size: md.is_file().then(|| md.len()),
                modified: md.modified().ok(),
            });
        }
        Ok(out)
    }

    fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata> {
        let md = std::fs::metadata(path)?;
        Ok(FsMetadata {
            is_file: md.is_file(),
            is_dir: md.is_dir(),
        })
    }
}

#[cfg(test)]
pub(crate) mod mem {
    //! In-memory file system for unit tests.

    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::collections::BTreeMap;
    use std::io;

    #[derive(Clone, Debug)]
    enum Node {
        File { size: u64 },
        Dir,
    }

    /// Flat map of absolute paths; parents are implied.
    #[derive(Debug, Default)]
    pub(crate) struct MemFs {
        nodes: RefCell<BTreeMap<PathBuf, Node>>,
        pub(crate) unreadable: RefCell<Vec<PathBuf>>,
    }

    impl MemFs {
        pub(crate) fn with_files(dir: &str, names: &[&str]) -> Self {
            let fs = Self::default();
            for n in names {
                fs.add_file(Path::new(dir).join(n));
            }
            fs
        }

        pub(crate) fn add_file(&self, path: impl Into<PathBuf>) {
            self.nodes
                .borrow_mut()
                .insert(path.into(), Node::File { size: 1 });
        }

        pub(crate) fn add_dir(&self, path: impl Into<PathBuf>) {
            self.nodes.borrow_mut().insert(path.into(), Node::Dir);
        }

        pub(crate) fn remove(&self, path: impl AsRef<Path>) {
            self.nodes.borrow_mut().remove(path.as_ref());
        }
    }

    impl FileSystem for MemFs {
        fn read_dir(&self, dir: &Path) -> io::Result<Vec<FsEntry>> {
            if self.unreadable.borrow().iter().any(|p| p == dir) {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            let nodes = self.nodes.borrow();
            let out = nodes
                .iter()
                .filter(|(p, _)| p.parent() == Some(dir))
                .map(|(p, node)| FsEntry {
                    name: p
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                    is_file: matches!(node, Node::File { .. }),
                    size: match node {
                        Node::File { size } => Some(*size),
                        Node::Dir => None,
                    },
                    modified: None,
                })
                .collect::<Vec<_>>();
            if out.is_empty() && !nodes.contains_key(dir) {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            Ok(out)
        }

        fn metadata(&self, path: &Path) -> io::Result<FsMetadata> {
            match self.nodes.borrow().get(path) {
                Some(Node::File { .. }) => Ok(FsMetadata {
                    is_file: true,
                    is_dir: false,
                }),
                Some(Node::Dir) => Ok(FsMetadata {
                    is_file: false,
                    is_dir: true,
                }),
                None => Err(io::Error::from(io::ErrorKind::NotFound)),
            }
        }
    }
}
