//! Region descriptors for the memory map: readability/writability and the
//! `ram | rom | io | device` classification for a mapped region.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Ram,
    Rom,
    Io,
    Device,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDescriptor {
    pub label: &'static str,
    pub kind: RegionKind,
    pub readable: bool,
    pub writable: bool,
}

impl RegionDescriptor {
    pub fn new(label: &'static str, kind: RegionKind, readable: bool, writable: bool) -> Self {
        Self {
            label,
            kind,
            readable,
            writable,
        }
    }
}
