//! Generational slot storage.
//!
//! A freed slot bumps its generation, so a key that outlived its entry
//! resolves to `None` instead of aliasing whatever reuses the slot.

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SlotKey {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

pub(crate) struct Slots<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Slots<T> {
    pub(crate) fn new() -> Self {
        Slots {
            entries: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn insert(&mut self, value: T) -> SlotKey {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            entry.value = Some(value);
            return SlotKey {
                index,
                generation: entry.generation,
            };
        }

        let index = u32::try_from(self.entries.len()).unwrap_or_else(|_| {
            panic!("heap exhausted: more than {} live slots", u32::MAX)
        });
        self.entries.push(Entry {
            generation: 0,
            value: Some(value),
        });
        SlotKey {
            index,
            generation: 0,
        }
    }

    pub(crate) fn get(&self, key: SlotKey) -> Option<&T> {
        let entry = self.entries.get(key.index as usize)?;
        if entry.generation != key.generation {
            return None;
        }
        entry.value.as_ref()
    }

    pub(crate) fn get_mut(&mut self, key: SlotKey) -> Option<&mut T> {
        let entry = self.entries.get_mut(key.index as usize)?;
        if entry.generation != key.generation {
            return None;
        }
        entry.value.as_mut()
    }

    pub(crate) fn contains(&self, key: SlotKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of slots ever allocated, live or free.
    pub(crate) fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Frees every live slot whose index is not marked; returns how many.
    pub(crate) fn sweep(&mut self, marked: &[bool]) -> usize {
        let mut freed = 0;
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.value.is_none() || marked.get(index).copied().unwrap_or(false) {
                continue;
            }
            entry.value = None;
            entry.generation = entry.generation.wrapping_add(1);
            #[expect(
                clippy::cast_possible_truncation,
                reason = "entries never exceed u32::MAX, checked in insert"
            )]
            let index = index as u32;
            self.free.push(index);
            freed += 1;
        }
        self.live -= freed;
        freed
    }
}
