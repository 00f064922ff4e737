//! Memory Manager: the 64 KiB address space shared by the CPU core and the
//! BASIC interpreter's PEEK/POKE statements, with bank switching, region
//! protection, memory-mapped I/O handlers, and optional access tracing.

mod region;
mod trace;

pub use region::{RegionDescriptor, RegionKind};
pub use trace::{AccessOp, AccessRecord};

use crate::error::{AccessKind, EngineError, EngineResult};
use log::{debug, warn};
use std::collections::HashMap;
use trace::AccessTrace;

const ADDR_SPACE: usize = 0x1_0000;
const PRIMARY_BANK: &str = "primary";

/// A half-open-on-the-right address range `[start, end]`, both inclusive,
/// used as the key for region lookups. Stored sorted by `start` so
/// `region_for` can use a linear scan over a small table (region maps are
/// expected to hold a handful of entries, not thousands).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrRange {
    pub start: u16,
    pub end: u16,
}

impl AddrRange {
    pub fn new(start: u16, end: u16) -> Self {
        assert!(start <= end, "region range must be non-decreasing");
        Self { start, end }
    }

    fn contains(&self, addr: u16) -> bool {
        addr >= self.start && addr <= self.end
    }
}

/// Trait object backing a region's memory-mapped I/O read or write hook.
pub trait ReadHandler: std::fmt::Debug {
    fn read(&mut self, addr: u16) -> u8;
}

pub trait WriteHandler: std::fmt::Debug {
    fn write(&mut self, addr: u16, value: u8);
}

struct MappedRegion {
    range: AddrRange,
    descriptor: RegionDescriptor,
    read_handler: Option<Box<dyn ReadHandler>>,
    write_handler: Option<Box<dyn WriteHandler>>,
}

impl std::fmt::Debug for MappedRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedRegion")
            .field("range", &self.range)
            .field("descriptor", &self.descriptor)
            .finish()
    }
}

#[derive(Debug)]
pub struct MemoryManager {
    banks: HashMap<String, Box<[u8; ADDR_SPACE]>>,
    selected_bank: String,
    regions: Vec<MappedRegion>,
    trace: Option<AccessTrace>,
}

impl MemoryManager {
    /// Builds the manager with the default map: zero page
    /// and stack as plain RAM, `$FFFA-$FFFF` as the interrupt-vector region
    /// (optionally read-only).
    pub fn new(protect_vectors: bool) -> Self {
        let mut banks = HashMap::new();
        banks.insert(PRIMARY_BANK.to_string(), Box::new([0u8; ADDR_SPACE]));

        let mut mgr = Self {
            banks,
            selected_bank: PRIMARY_BANK.to_string(),
            regions: Vec::new(),
            trace: None,
        };

        mgr.set_region(
            AddrRange::new(0x0000, 0x00FF),
            RegionDescriptor::new("Zero Page", RegionKind::Ram, true, true),
        )
        .expect("static range");
        mgr.set_region(
            AddrRange::new(0x0100, 0x01FF),
            RegionDescriptor::new("Stack", RegionKind::Ram, true, true),
        )
        .expect("static range");
        mgr.set_region(
            AddrRange::new(0xFFFA, 0xFFFF),
            RegionDescriptor::new("Interrupt Vectors", RegionKind::Rom, true, !protect_vectors),
        )
        .expect("static range");

        mgr
    }

    pub fn enable_tracing(&mut self, capacity: usize) {
        self.trace = Some(AccessTrace::new(capacity));
    }

    pub fn disable_tracing(&mut self) {
        self.trace = None;
    }

    pub fn access_log(&mut self) -> &[AccessRecord] {
        match &mut self.trace {
            Some(trace) => trace.records(),
            None => &[],
        }
    }

    fn region_for(&self, addr: u16) -> Option<&MappedRegion> {
        self.regions.iter().find(|r| r.range.contains(addr))
    }

    fn region_for_mut(&mut self, addr: u16) -> Option<&mut MappedRegion> {
        self.regions.iter_mut().find(|r| r.range.contains(addr))
    }

    fn active_bank(&mut self) -> &mut [u8; ADDR_SPACE] {
        self.banks
            .get_mut(&self.selected_bank)
            .expect("selected bank always exists")
    }

    pub fn read_byte(&mut self, addr: u16) -> EngineResult<u8> {
        if let Some(region) = self.region_for(addr) {
            if !region.descriptor.readable {
                return Err(EngineError::AccessDenied {
                    addr,
                    op: AccessKind::Read,
                    reason: "region not readable",
                });
            }
        }

        let has_handler = self
            .region_for(addr)
            .map(|r| r.read_handler.is_some())
            .unwrap_or(false);

        let value = if has_handler {
            self.region_for_mut(addr)
                .unwrap()
                .read_handler
                .as_mut()
                .unwrap()
                .read(addr)
        } else {
            self.active_bank()[addr as usize]
        };

        if let Some(trace) = &mut self.trace {
            trace.record(addr, AccessOp::Read, value, None, &self.selected_bank);
        }
        Ok(value)
    }

    pub fn write_byte(&mut self, addr: u16, val: u8) -> EngineResult<()> {
        if let Some(region) = self.region_for(addr) {
            if !region.descriptor.writable {
                return Err(EngineError::AccessDenied {
                    addr,
                    op: AccessKind::Write,
                    reason: "region not writable",
                });
            }
        }

        let prior = self.active_bank()[addr as usize];
        let has_handler = self
            .region_for(addr)
            .map(|r| r.write_handler.is_some())
            .unwrap_or(false);

        if has_handler {
            self.region_for_mut(addr)
                .unwrap()
                .write_handler
                .as_mut()
                .unwrap()
                .write(addr, val);
        } else {
            self.active_bank()[addr as usize] = val;
        }

        if let Some(trace) = &mut self.trace {
            trace.record(addr, AccessOp::Write, val, Some(prior), &self.selected_bank);
        }
        Ok(())
    }

    /// Little-endian word read; addresses wrap at `0x10000` per byte.
    pub fn read_word(&mut self, addr: u16) -> EngineResult<u16> {
        let lo = self.read_byte(addr)?;
        let hi = self.read_byte(addr.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    pub fn write_word(&mut self, addr: u16, val: u16) -> EngineResult<()> {
        let [lo, hi] = val.to_le_bytes();
        self.write_byte(addr, lo)?;
        self.write_byte(addr.wrapping_add(1), hi)
    }

    /// Reads the high byte of an indirect pointer honoring the documented
    /// NMOS 6502 page-boundary bug: if `ptr & 0xFF == 0xFF`, the high byte
    /// comes from `ptr & 0xFF00`, not `ptr + 1`.
    pub fn read_word_bugged_indirect(&mut self, ptr: u16) -> EngineResult<u16> {
        let lo = self.read_byte(ptr)?;
        let hi_addr = if ptr & 0x00FF == 0x00FF {
            ptr & 0xFF00
        } else {
            ptr.wrapping_add(1)
        };
        let hi = self.read_byte(hi_addr)?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Copies `len` bytes from `src` to `dst`. Direction is chosen so
    /// overlapping ranges with `src < dst < src + len` still observe a
    /// byte-by-byte-loop-equivalent result (copy high-to-low in that case).
    pub fn bulk_copy(&mut self, src: u16, dst: u16, len: i64) -> EngineResult<()> {
        if len < 0 {
            return Err(EngineError::InvalidLength(len));
        }
        let len = len as u32;
        let overlap_descending = (dst as u32) > (src as u32) && (src as u32 + len) > dst as u32;

        if overlap_descending {
            for i in (0..len).rev() {
                let v = self.read_byte(src.wrapping_add(i as u16))?;
                self.write_byte(dst.wrapping_add(i as u16), v)?;
            }
        } else {
            for i in 0..len {
                let v = self.read_byte(src.wrapping_add(i as u16))?;
                self.write_byte(dst.wrapping_add(i as u16), v)?;
            }
        }
        Ok(())
    }

    pub fn fill(&mut self, addr: u16, len: i64, val: u8) -> EngineResult<()> {
        if len < 0 {
            return Err(EngineError::InvalidLength(len));
        }
        for i in 0..len as u32 {
            self.write_byte(addr.wrapping_add(i as u16), val)?;
        }
        Ok(())
    }

    pub fn search(&mut self, pattern: &[u8], start: u16, end: u16) -> EngineResult<Vec<u16>> {
        if pattern.is_empty() {
            return Ok(Vec::new());
        }
        let mut hits = Vec::new();
        let mut addr = start as u32;
        let end = end as u32;
        while addr <= end {
            let mut matched = true;
            for (i, byte) in pattern.iter().enumerate() {
                let probe = addr + i as u32;
                if probe > 0xFFFF {
                    matched = false;
                    break;
                }
                if self.read_byte(probe as u16)? != *byte {
                    matched = false;
                    break;
                }
            }
            if matched {
                hits.push(addr as u16);
            }
            addr += 1;
        }
        Ok(hits)
    }

    pub fn create_bank(&mut self, name: &str) -> EngineResult<()> {
        if self.banks.contains_key(name) {
            return Err(EngineError::DuplicateBank(name.to_string()));
        }
        self.banks.insert(name.to_string(), Box::new([0u8; ADDR_SPACE]));
        debug!("created memory bank '{name}'");
        Ok(())
    }

    pub fn switch_bank(&mut self, name: &str) -> EngineResult<()> {
        if !self.banks.contains_key(name) {
            return Err(EngineError::UnknownBank(name.to_string()));
        }
        self.selected_bank = name.to_string();
        Ok(())
    }

    pub fn delete_bank(&mut self, name: &str) -> EngineResult<()> {
        if name == PRIMARY_BANK {
            return Err(EngineError::BankInUse(name.to_string()));
        }
        if name == self.selected_bank {
            return Err(EngineError::BankInUse(name.to_string()));
        }
        if self.banks.remove(name).is_none() {
            return Err(EngineError::UnknownBank(name.to_string()));
        }
        Ok(())
    }

    pub fn selected_bank(&self) -> &str {
        &self.selected_bank
    }

    pub fn set_region(&mut self, range: AddrRange, descriptor: RegionDescriptor) -> EngineResult<()> {
        self.regions.retain(|r| r.range != range);
        self.regions.push(MappedRegion {
            range,
            descriptor,
            read_handler: None,
            write_handler: None,
        });
        Ok(())
    }

    pub fn set_region_handlers(
        &mut self,
        range: AddrRange,
        read: Option<Box<dyn ReadHandler>>,
        write: Option<Box<dyn WriteHandler>>,
    ) -> EngineResult<()> {
        match self.regions.iter_mut().find(|r| r.range == range) {
            Some(region) => {
                region.read_handler = read;
                region.write_handler = write;
                Ok(())
            }
            None => {
                warn!("set_region_handlers on unmapped range {:?}", range);
                Err(EngineError::InvalidAddress(range.start as u32))
            }
        }
    }

    pub fn clear_region(&mut self, range: AddrRange) {
        self.regions.retain(|r| r.range != range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip() {
        let mut mem = MemoryManager::new(true);
        mem.write_byte(0x0050, 0xAB).unwrap();
        assert_eq!(mem.read_byte(0x0050).unwrap(), 0xAB);
    }

    #[test]
    fn word_round_trip_little_endian() {
        let mut mem = MemoryManager::new(true);
        mem.write_word(0x0200, 0x1234).unwrap();
        assert_eq!(mem.read_byte(0x0200).unwrap(), 0x34);
        assert_eq!(mem.read_byte(0x0201).unwrap(), 0x12);
        assert_eq!(mem.read_word(0x0200).unwrap(), 0x1234);
    }

    #[test]
    fn word_read_wraps_at_top_of_address_space() {
        let mut mem = MemoryManager::new(false);
        mem.write_byte(0xFFFF, 0x11).unwrap();
        mem.write_byte(0x0000, 0x22).unwrap();
        assert_eq!(mem.read_word(0xFFFF).unwrap(), 0x2211);
    }

    #[test]
    fn indirect_jmp_page_boundary_bug() {
        let mut mem = MemoryManager::new(false);
        mem.write_byte(0x30FF, 0x00).unwrap();
        mem.write_byte(0x3000, 0x40).unwrap();
        mem.write_byte(0x3100, 0x80).unwrap();
        assert_eq!(mem.read_word_bugged_indirect(0x30FF).unwrap(), 0x4000);
    }

    #[test]
    fn interrupt_vector_region_is_protected_by_default() {
        let mut mem = MemoryManager::new(true);
        let err = mem.write_byte(0xFFFC, 0x01).unwrap_err();
        assert!(matches!(err, EngineError::AccessDenied { .. }));
    }

    #[test]
    fn bank_lifecycle() {
        let mut mem = MemoryManager::new(true);
        mem.create_bank("alt").unwrap();
        assert!(matches!(
            mem.create_bank("alt").unwrap_err(),
            EngineError::DuplicateBank(_)
        ));
        mem.write_byte(0x1000, 0x42).unwrap();
        mem.switch_bank("alt").unwrap();
        assert_eq!(mem.read_byte(0x1000).unwrap(), 0x00);
        mem.switch_bank("primary").unwrap();
        assert_eq!(mem.read_byte(0x1000).unwrap(), 0x42);

        assert!(matches!(
            mem.delete_bank("primary").unwrap_err(),
            EngineError::BankInUse(_)
        ));
        mem.switch_bank("alt").unwrap();
        assert!(matches!(
            mem.delete_bank("alt").unwrap_err(),
            EngineError::BankInUse(_)
        ));
    }

    #[test]
    fn bulk_copy_overlapping_forward_shift() {
        let mut mem = MemoryManager::new(true);
        for i in 0..5u16 {
            mem.write_byte(0x2000 + i, i as u8 + 1).unwrap();
        }
        // shift [0x2000..0x2005) to [0x2002..0x2007): dst > src, overlapping
        mem.bulk_copy(0x2000, 0x2002, 5).unwrap();
        let mut out = Vec::new();
        for i in 0..7u16 {
            out.push(mem.read_byte(0x2000 + i).unwrap());
        }
        assert_eq!(out, vec![1, 2, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn search_finds_pattern() {
        let mut mem = MemoryManager::new(true);
        mem.write_byte(0x3000, 0xDE).unwrap();
        mem.write_byte(0x3001, 0xAD).unwrap();
        mem.write_byte(0x4000, 0xDE).unwrap();
        mem.write_byte(0x4001, 0xAD).unwrap();
        let hits = mem.search(&[0xDE, 0xAD], 0x0000, 0xFFFF).unwrap();
        assert_eq!(hits, vec![0x3000, 0x4000]);
    }
}
