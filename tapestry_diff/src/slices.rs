use crate::engine::{RawComponent, shortest_edit};
use crate::model::SliceComponent;

/// Diff two already-tokenized sequences element by element.
///
/// Component values are subslices of the inputs; nothing is joined into a
/// string on this path.
pub fn diff_slices<'a, T: PartialEq>(old: &'a [T], new: &'a [T]) -> Vec<SliceComponent<'a, T>> {
    diff_slices_by(old, new, |left, right| left == right)
}

/// Diff two already-tokenized sequences with a caller-supplied comparator.
///
/// The comparator receives the new-sequence element on the left and the
/// old-sequence element on the right.
pub fn diff_slices_by<'a, T, F>(
    old: &'a [T],
    new: &'a [T],
    comparator: F,
) -> Vec<SliceComponent<'a, T>>
where
    F: Fn(&T, &T) -> bool,
{
    let raw = shortest_edit(old, new, comparator);

    let mut components: Vec<SliceComponent<'a, T>> = Vec::with_capacity(raw.len());
    let mut new_pos = 0usize;
    let mut old_pos = 0usize;

    for RawComponent {
        count,
        added,
        removed,
    } in raw
    {
        if removed {
            components.push(SliceComponent {
                count,
                added,
                removed,
                value: &old[old_pos..old_pos + count],
            });
            old_pos += count;

            // Removal-first presentation, as on the string path.
            let len = components.len();
            if len > 1 && components[len - 2].added {
                components.swap(len - 2, len - 1);
            }
        } else {
            components.push(SliceComponent {
                count,
                added,
                removed,
                value: &new[new_pos..new_pos + count],
            });
            new_pos += count;
            if !added {
                old_pos += count;
            }
        }
    }

    components
}
