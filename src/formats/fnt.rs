//! FNT (File Name Table) - directory tree of an NDS ROM.
//!
//! The FNT names every file in the ROM's filesystem and arranges them into
//! folders. It stores no file data; a file's ID (its index into the FAT) is
//! implied by its position: each folder records the ID of its first file and
//! the remaining files in that folder follow sequentially.
//!
//! ## Layout
//! ```text
//! [0x00] Folder descriptor table  (FolderCount × 0x08 bytes)
//! [...]  Entry lists, one per folder, in folder-ID order
//! ```
//!
//! ## Folder Descriptor (0x08 bytes)
//! ```text
//! [0x00] EntryListOffset - relative to the FNT start (u32 LE)
//! [0x04] FirstFileId                                  (u16 LE)
//! [0x06] ParentFolderId  - root: total folder count   (u16 LE)
//! ```
//!
//! ## Entry List
//! ```text
//! File entry:      [u8 len]        [len bytes name]
//! Subfolder entry: [u8 len | 0x80] [len bytes name] [u16 LE folder id]
//! End of list:     [u8 0x00]
//! ```
//!
//! ## Folder IDs
//! Folder IDs are biased by `0xF000`; the low 12 bits index the descriptor
//! table. The root is always `0xF000`, and the remaining folders are numbered
//! in pre-order (a folder before its children, children in entry order).
//! Names are single-byte text (Latin-1) of at most 127 characters.

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::utils::{bytesv, latin1_bytes, latin1_string, le_u16, le_u32, u8};
use crate::{Error, Result};

/// Biased ID of the root folder.
pub const ROOT_FOLDER_ID: u16 = 0xF000;

/// Most folders a single FNT can describe.
pub const MAX_FOLDERS: usize = 0x1000;

/// Longest file or folder name, in characters.
pub const MAX_NAME_LEN: usize = 0x7F;

const DESCRIPTOR_SIZE: usize = 8;
const FOLDER_FLAG: u8 = 0x80;
const FOLDER_INDEX_MASK: u16 = 0x0FFF;

/// Parsed file name table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Fnt {
    /// The root folder (ID `0xF000`).
    pub root: Folder,
}

/// One folder of the tree.
///
/// In the JSON interchange form the keys are `first_id`, `files` and
/// `folders`; the latter two are omitted when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Folder {
    /// ID of the first file directly inside this folder.
    #[cfg_attr(feature = "serde", serde(rename = "first_id"))]
    pub first_file_id: u16,
    /// File names, in table order.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub files: Vec<String>,
    /// Subfolders by name, in table order.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "IndexMap::is_empty")
    )]
    pub folders: IndexMap<String, Folder>,
}

/// A file listed in the table together with its implied file ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FntFile {
    /// `/`-separated path from the root.
    pub path: String,
    /// File ID (index into the FAT).
    pub id: u16,
}

impl Folder {
    /// Empty folder whose first file gets `first_file_id`.
    pub fn new(first_file_id: u16) -> Self {
        Self {
            first_file_id,
            ..Self::default()
        }
    }

    /// Number of folders in this subtree, this one included.
    pub fn folder_count(&self) -> usize {
        1 + self.folders.values().map(Folder::folder_count).sum::<usize>()
    }

    /// Number of files in this subtree.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.folders.values().map(Folder::file_count).sum::<usize>()
    }

    /// ID of the file `name` directly inside this folder.
    pub fn file_id(&self, name: &str) -> Option<u16> {
        let index = self.files.iter().position(|f| f == name)?;
        Some(self.first_file_id.wrapping_add(index as u16))
    }

    fn collect_files(&self, prefix: &str, out: &mut Vec<FntFile>) {
        for (index, name) in self.files.iter().enumerate() {
            out.push(FntFile {
                path: format!("{prefix}{name}"),
                id: self.first_file_id.wrapping_add(index as u16),
            });
        }
        for (name, folder) in &self.folders {
            folder.collect_files(&format!("{prefix}{name}/"), out);
        }
    }
}

impl Fnt {
    /// Parse an FNT from `r`.
    ///
    /// `r` must be positioned at the start of the descriptor table; entry
    /// list offsets are taken relative to that position.
    pub fn parse<R: Read + Seek>(r: &mut R) -> Result<Self> {
        let base = r.stream_position()?;
        let mut loaded = vec![false; MAX_FOLDERS];
        let root = load_folder(r, base, ROOT_FOLDER_ID, &mut loaded)?;
        debug!(
            folders = loaded.iter().filter(|&&l| l).count(),
            files = root.file_count(),
            "parsed FNT"
        );
        Ok(Self { root })
    }

    /// Parse an FNT held entirely in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::parse(&mut Cursor::new(data))
    }

    /// Serialize the table to its binary form.
    ///
    /// Folder IDs are reassigned in pre-order; the result parses back to an
    /// equal [`Fnt`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let count = self.root.folder_count();
        if count > MAX_FOLDERS {
            return Err(Error::TooManyFolders(count));
        }

        let mut records = Vec::with_capacity(count);
        let root_id = number_folder(&self.root, count as u16, &mut records)?;
        assert!(
            root_id == ROOT_FOLDER_ID && records.len() == count,
            "folder numbering out of step with folder count"
        );

        let mut out = vec![0u8; count * DESCRIPTOR_SIZE];
        for (index, record) in records.iter().enumerate() {
            let offset = u32::try_from(out.len()).map_err(|_| Error::InvalidRange)?;
            let start = index * DESCRIPTOR_SIZE;
            let descriptor = &mut out[start..start + DESCRIPTOR_SIZE];
            descriptor[0..4].copy_from_slice(&offset.to_le_bytes());
            descriptor[4..6].copy_from_slice(&record.first_file_id.to_le_bytes());
            descriptor[6..8].copy_from_slice(&record.parent_id.to_le_bytes());
            out.extend_from_slice(&record.entries);
        }

        debug!(folders = count, bytes = out.len(), "built FNT");
        Ok(out)
    }

    /// Serialize the table into `w`.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&self.to_bytes()?)?;
        Ok(())
    }

    /// Total number of folders, root included.
    pub fn folder_count(&self) -> usize {
        self.root.folder_count()
    }

    /// Total number of files.
    pub fn file_count(&self) -> usize {
        self.root.file_count()
    }

    /// Iterate over every file in table order.
    pub fn files(&self) -> impl Iterator<Item = FntFile> {
        let mut out = Vec::with_capacity(self.file_count());
        self.root.collect_files("", &mut out);
        out.into_iter()
    }

    /// Find a folder by `/`-separated path. The empty path is the root.
    pub fn get_folder(&self, path: &str) -> Option<&Folder> {
        path.split('/')
            .filter(|part| !part.is_empty())
            .try_fold(&self.root, |folder, part| folder.folders.get(part))
    }

    /// Find a file's ID by `/`-separated path.
    pub fn get_file_id(&self, path: &str) -> Option<u16> {
        let path = path.trim_start_matches('/');
        let (dir, name) = path.rsplit_once('/').unwrap_or(("", path));
        self.get_folder(dir)?.file_id(name)
    }
}

/// Load folder `id` and, recursively, everything below it.
///
/// `loaded` marks descriptor slots already visited so a malformed table with
/// a folder cycle fails instead of recursing forever.
fn load_folder<R: Read + Seek>(
    r: &mut R,
    base: u64,
    id: u16,
    loaded: &mut [bool],
) -> Result<Folder> {
    let index = (id & FOLDER_INDEX_MASK) as usize;
    if std::mem::replace(&mut loaded[index], true) {
        return Err(Error::FolderRevisited(id));
    }

    r.seek(SeekFrom::Start(base + (index * DESCRIPTOR_SIZE) as u64))?;
    let entries_offset = le_u32(r)?;
    let first_file_id = le_u16(r)?;
    trace!(id, entries_offset, first_file_id, "loading folder");

    let mut folder = Folder::new(first_file_id);
    r.seek(SeekFrom::Start(base + entries_offset as u64))?;
    loop {
        let control = u8(r)?;
        if control == 0 {
            break;
        }

        let len = (control & !FOLDER_FLAG) as usize;
        let name = latin1_string(&bytesv(r, len)?);

        if control & FOLDER_FLAG != 0 {
            let sub_id = le_u16(r)?;
            let resume = r.stream_position()?;
            let sub = load_folder(r, base, sub_id, loaded)?;
            r.seek(SeekFrom::Start(resume))?;
            folder.folders.insert(name, sub);
        } else {
            folder.files.push(name);
        }
    }

    Ok(folder)
}

/// Descriptor fields and serialized entry list of one folder.
struct FolderRecord {
    first_file_id: u16,
    parent_id: u16,
    entries: Vec<u8>,
}

/// Assign `folder` the next free ID, then number its subfolders in order.
///
/// `records[i]` ends up describing folder `0xF000 + i`. The caller has
/// already checked that the tree fits in [`MAX_FOLDERS`].
fn number_folder(folder: &Folder, parent_id: u16, records: &mut Vec<FolderRecord>) -> Result<u16> {
    let index = records.len();
    let id = ROOT_FOLDER_ID + index as u16;
    records.push(FolderRecord {
        first_file_id: folder.first_file_id,
        parent_id,
        entries: Vec::new(),
    });

    let mut entries = Vec::new();
    for name in &folder.files {
        if name.is_empty() {
            return Err(Error::Parse("empty file name"));
        }
        push_name(&mut entries, name, 0)?;
    }
    for (name, sub) in &folder.folders {
        let sub_id = number_folder(sub, id, records)?;
        push_name(&mut entries, name, FOLDER_FLAG)?;
        entries.extend_from_slice(&sub_id.to_le_bytes());
    }
    entries.push(0);

    records[index].entries = entries;
    Ok(id)
}

fn push_name(out: &mut Vec<u8>, name: &str, flag: u8) -> Result<()> {
    let bytes = latin1_bytes(name)?;
    if bytes.len() > MAX_NAME_LEN {
        return Err(Error::NameTooLong(bytes.len()));
    }
    out.push(bytes.len() as u8 | flag);
    out.extend_from_slice(&bytes);
    Ok(())
}
