//! Array-backed binary min-heap whose elements track their own slot.
//!
//! The functions operate on a plain slice. Ordering comes from a `less`
//! predicate and every time an element lands in a slot the `assign` callback
//! is told about it, so the owner can keep a back-reference for decrease-key.

/// Heapify an arbitrary slice bottom-up and report every element's slot.
pub fn make_heap<T, F, A>(heap: &mut [T], less: F, mut assign: A)
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
    A: FnMut(&T, usize),
{
    let len = heap.len();
    for i in (0..len / 2).rev() {
        shift_down(heap, i, &less, &mut assign);
    }
    for (slot, item) in heap.iter().enumerate() {
        assign(item, slot);
    }
}

/// Move the element at `i` towards the root until its parent is not larger.
///
/// Used after a key decrease or after pushing a new element at the end.
pub fn shift_up<T, F, A>(heap: &mut [T], mut i: usize, less: F, mut assign: A)
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
    A: FnMut(&T, usize),
{
    let item = heap[i];
    while i > 0 {
        let parent = (i - 1) / 2;
        if !less(&item, &heap[parent]) {
            break;
        }
        heap[i] = heap[parent];
        assign(&heap[i], i);
        i = parent;
    }
    heap[i] = item;
    assign(&heap[i], i);
}

/// Move the element at `i` towards the leaves until no child is smaller.
pub fn shift_down<T, F, A>(heap: &mut [T], mut i: usize, less: F, mut assign: A)
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
    A: FnMut(&T, usize),
{
    let len = heap.len();
    let item = heap[i];
    loop {
        let left = 2 * i + 1;
        if left >= len {
            break;
        }
        let right = left + 1;
        let child = if right < len && less(&heap[right], &heap[left]) {
            right
        } else {
            left
        };
        if !less(&heap[child], &item) {
            break;
        }
        heap[i] = heap[child];
        assign(&heap[i], i);
        i = child;
    }
    heap[i] = item;
    assign(&heap[i], i);
}

/// Swap the minimum into the last slot and restore the heap over the rest.
///
/// Returns the minimum, which now sits at `heap[len - 1]`; the caller pops
/// that slot from its own storage. Returns `None` on an empty heap.
pub fn extract_min<T, F, A>(heap: &mut [T], less: F, mut assign: A) -> Option<T>
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
    A: FnMut(&T, usize),
{
    let last = heap.len().checked_sub(1)?;
    heap.swap(0, last);
    let rest = &mut heap[..last];
    if !rest.is_empty() {
        shift_down(rest, 0, &less, &mut assign);
    }
    Some(heap[last])
}

/// True when no element is smaller than its parent.
pub fn check_heap<T, F>(heap: &[T], less: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    (1..heap.len()).all(|i| !less(&heap[i], &heap[(i - 1) / 2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug)]
    struct Item {
        key: u32,
        id: usize,
    }

    fn less(a: &Item, b: &Item) -> bool {
        (a.key, a.id) < (b.key, b.id)
    }

    fn items(keys: &[u32]) -> Vec<Item> {
        keys.iter()
            .enumerate()
            .map(|(id, &key)| Item { key, id })
            .collect()
    }

    #[test]
    fn make_heap_covers_every_internal_node() {
        // Smallest key sits below slot 1, the last internal node.
        let mut heap = items(&[5, 9, 7, 1]);
        let mut slots = vec![usize::MAX; heap.len()];
        make_heap(&mut heap, less, |item, slot| slots[item.id] = slot);
        assert!(check_heap(&heap, less));
        assert_eq!(heap[0].key, 1);
        for (slot, item) in heap.iter().enumerate() {
            assert_eq!(slots[item.id], slot);
        }
    }

    #[test]
    fn decrease_key_bubbles_to_root() {
        let mut heap = items(&[1, 4, 6, 8, 9, 10]);
        let mut slots = vec![0; heap.len()];
        make_heap(&mut heap, less, |item, slot| slots[item.id] = slot);
        let slot = slots[5];
        heap[slot].key = 0;
        shift_up(&mut heap, slot, less, |item, s| slots[item.id] = s);
        assert!(check_heap(&heap, less));
        assert_eq!(heap[0].id, 5);
        assert_eq!(slots[5], 0);
    }

    #[test]
    fn extraction_yields_sorted_order() {
        let mut heap = items(&[7, 3, 9, 3, 1, 8, 2]);
        let mut slots = vec![0; heap.len()];
        make_heap(&mut heap, less, |item, slot| slots[item.id] = slot);
        let mut out = Vec::new();
        while let Some(min) = extract_min(&mut heap, less, |item, s| slots[item.id] = s) {
            heap.pop();
            assert!(check_heap(&heap, less));
            out.push(min.key);
        }
        assert_eq!(out, vec![1, 2, 3, 3, 7, 8, 9]);
    }

    #[test]
    fn ties_break_on_secondary_key() {
        let mut heap = items(&[4, 4, 4]);
        make_heap(&mut heap, less, |_, _| {});
        let first = extract_min(&mut heap, less, |_, _| {}).unwrap();
        assert_eq!(first.id, 0);
    }

    #[test]
    fn empty_heap_extracts_nothing() {
        let mut heap: Vec<Item> = Vec::new();
        assert!(extract_min(&mut heap, less, |_, _| {}).is_none());
        assert!(check_heap(&heap, less));
    }
}
