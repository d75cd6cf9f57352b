//! `HugeSparseArray` — a paged, growable array keyed by a `u64` index.
//!
//! Goals:
//! - predictable allocation behavior (fixed-size, power-of-two pages)
//! - pages are allocated lazily on first write, never freed afterwards
//! - reading an unallocated index returns a configured default value
//! - O(1) amortized random access and write
//!
//! Real graphs exhibit either dense small-id spaces (the array is
//! effectively full) or sparse derived id spaces (per-relationship-type
//! properties, filtered views). A single growable, page-lazy structure
//! avoids pre-sizing to the worst case while keeping random access O(1).
//!
//! The builder is safe for racing writers: page allocation is
//! double-checked behind an `RwLock` page directory, and cell writes are
//! atomic bit stores. Writers that race on the *same* index get
//! last-write-wins for [`HugeSparseArrayBuilder::set`]; slot-claiming
//! workers should use [`HugeSparseArrayBuilder::set_if_absent`] instead.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use num_traits::{NumAssign, Zero};

/// Number of elements per page (power of two).
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;
const PAGE_SHIFT: u32 = 12;
const PAGE_MASK: u64 = (PAGE_SIZE as u64) - 1;

/// Highest index addressable by the paged layout.
///
/// Indices beyond this are a fatal contract violation at the call site.
pub const MAX_INDEX: u64 = (1 << 56) - 1;

/// Element types storable in a sparse array.
///
/// Values round-trip losslessly through a `u64` bit pattern so that pages
/// can be plain `AtomicU64` cells during the build phase.
pub trait SparseValue: Copy + PartialEq + Send + Sync + 'static {
    /// Encodes the value into a `u64` bit pattern.
    fn to_bits(self) -> u64;
    /// Decodes a value previously encoded by [`SparseValue::to_bits`].
    fn from_bits(bits: u64) -> Self;
}

macro_rules! sparse_value_int {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(impl SparseValue for $t {
            #[inline]
            fn to_bits(self) -> u64 {
                // Zero-extend through the same-width unsigned type so
                // that sign bits never leak into higher bit positions.
                u64::from(self as $u)
            }
            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            fn from_bits(bits: u64) -> Self {
                bits as $u as $t
            }
        })*
    };
}

sparse_value_int!(u8 => u8, i32 => u32, u32 => u32);

impl SparseValue for u64 {
    #[inline]
    fn to_bits(self) -> u64 {
        self
    }
    #[inline]
    fn from_bits(bits: u64) -> Self {
        bits
    }
}

impl SparseValue for i64 {
    #[inline]
    #[allow(clippy::cast_sign_loss)]
    fn to_bits(self) -> u64 {
        self as u64
    }
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn from_bits(bits: u64) -> Self {
        bits as i64
    }
}

impl SparseValue for usize {
    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from_bits(bits: u64) -> Self {
        bits as usize
    }
}

impl SparseValue for f64 {
    #[inline]
    fn to_bits(self) -> u64 {
        self.to_bits()
    }
    #[inline]
    fn from_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

impl SparseValue for f32 {
    #[inline]
    fn to_bits(self) -> u64 {
        u64::from(self.to_bits())
    }
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn from_bits(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn page_index(index: u64) -> usize {
    assert!(
        index <= MAX_INDEX,
        "index {index} exceeds the paged address range"
    );
    (index >> PAGE_SHIFT) as usize
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn index_in_page(index: u64) -> usize {
    (index & PAGE_MASK) as usize
}

type AtomicPage = Arc<[AtomicU64]>;

/// Growing builder for a [`HugeSparseArray`].
///
/// All operations take `&self`; the builder may be shared across worker
/// threads. Page allocation is the only internal race and is resolved by
/// double-checked locking on the page directory.
pub struct HugeSparseArrayBuilder<T: SparseValue> {
    default: T,
    default_bits: u64,
    pages: RwLock<Vec<Option<AtomicPage>>>,
}

impl<T: SparseValue> HugeSparseArrayBuilder<T> {
    /// Creates a builder whose unwritten indices read as `default`.
    pub fn new(default: T) -> Self {
        Self {
            default,
            default_bits: default.to_bits(),
            pages: RwLock::new(Vec::new()),
        }
    }

    /// Creates a builder with a zero default value.
    pub fn with_zero_default() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero())
    }

    /// The default value configured at construction.
    pub fn default_value(&self) -> T {
        self.default
    }

    /// Highest addressable index + 1, given the pages allocated so far.
    pub fn capacity(&self) -> u64 {
        let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);
        let allocated = pages
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |last| last + 1);
        (allocated as u64) << PAGE_SHIFT
    }

    /// Unconditionally writes `value` at `index`, growing as needed.
    pub fn set(&self, index: u64, value: T) {
        let page = self.page(index);
        page[index_in_page(index)].store(value.to_bits(), Ordering::Release);
    }

    /// Writes `value` at `index` only if the slot still holds the default.
    ///
    /// Returns whether the write happened. Racing workers claiming
    /// ownership of a slot can rely on exactly one of them winning.
    pub fn set_if_absent(&self, index: u64, value: T) -> bool {
        let page = self.page(index);
        page[index_in_page(index)]
            .compare_exchange(
                self.default_bits,
                value.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Adds `delta` to the value at `index` (read-modify-write).
    ///
    /// Atomic against racing `add_to` calls on the same index.
    pub fn add_to(&self, index: u64, delta: T)
    where
        T: NumAssign,
    {
        let page = self.page(index);
        let cell = &page[index_in_page(index)];
        let mut current = cell.load(Ordering::Acquire);
        loop {
            let mut value = T::from_bits(current);
            value += delta;
            match cell.compare_exchange_weak(
                current,
                value.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return,
                Err(observed) => current = observed,
            }
        }
    }

    /// Finalizes the builder into a read-only array.
    pub fn build(self) -> HugeSparseArray<T> {
        let pages = self
            .pages
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        let mut frozen: Vec<Option<Box<[u64]>>> = pages
            .into_iter()
            .map(|page| {
                page.map(|cells| {
                    cells
                        .iter()
                        .map(|cell| cell.load(Ordering::Acquire))
                        .collect()
                })
            })
            .collect();
        while matches!(frozen.last(), Some(None)) {
            frozen.pop();
        }
        HugeSparseArray {
            default: self.default,
            default_bits: self.default_bits,
            pages: frozen,
        }
    }

    /// Returns the page covering `index`, allocating it if necessary.
    fn page(&self, index: u64) -> AtomicPage {
        let page_idx = page_index(index);
        {
            let pages = self.pages.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(Some(page)) = pages.get(page_idx) {
                return Arc::clone(page);
            }
        }
        let mut pages = self.pages.write().unwrap_or_else(PoisonError::into_inner);
        if pages.len() <= page_idx {
            // Geometric directory growth keeps amortized set cost O(1).
            let target = (page_idx + 1).next_power_of_two().max(pages.len() * 2);
            pages.resize(target, None);
        }
        // Re-check under the write lock: another writer may have won.
        if let Some(page) = &pages[page_idx] {
            return Arc::clone(page);
        }
        let page: AtomicPage = (0..PAGE_SIZE)
            .map(|_| AtomicU64::new(self.default_bits))
            .collect();
        pages[page_idx] = Some(Arc::clone(&page));
        page
    }
}

/// Read-only paged sparse array produced by [`HugeSparseArrayBuilder`].
pub struct HugeSparseArray<T: SparseValue> {
    default: T,
    default_bits: u64,
    pages: Vec<Option<Box<[u64]>>>,
}

impl<T: SparseValue> HugeSparseArray<T> {
    /// Returns the value at `index`.
    ///
    /// Never fails: unallocated pages and indices beyond capacity read as
    /// the default value.
    pub fn get(&self, index: u64) -> T {
        let page_idx = page_index(index);
        match self.pages.get(page_idx) {
            Some(Some(page)) => T::from_bits(page[index_in_page(index)]),
            _ => self.default,
        }
    }

    /// Returns whether `index` holds an explicitly written, non-default
    /// value.
    ///
    /// True iff the index's page is allocated and the stored bit pattern
    /// differs from the default value's.
    pub fn contains(&self, index: u64) -> bool {
        let page_idx = page_index(index);
        match self.pages.get(page_idx) {
            Some(Some(page)) => page[index_in_page(index)] != self.default_bits,
            _ => false,
        }
    }

    /// Highest addressable index + 1, given allocated pages.
    pub fn capacity(&self) -> u64 {
        (self.pages.len() as u64) << PAGE_SHIFT
    }

    /// The default value configured at construction.
    pub fn default_value(&self) -> T {
        self.default
    }
}
