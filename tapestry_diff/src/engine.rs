use crate::model::EditComponent;
use crate::strategy::Strategy;

/// Run of consecutive search steps sharing one classification, before values
/// are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawComponent {
    pub count: usize,
    pub added: bool,
    pub removed: bool,
}

/// In-progress path through the edit graph, owned by one frontier diagonal.
#[derive(Debug, Clone)]
struct EditPath {
    new_pos: isize,
    components: Vec<RawComponent>,
}

/// Shortest-edit-script search over diagonals.
///
/// At edit length `d`, every diagonal `k` in `[-d, d]` with `k ≡ d (mod 2)`
/// extends the better of its two neighbors' paths, then slides through the
/// longest run of equal tokens. The first path to reach both sequence ends
/// wins. `equals` receives the new-sequence token on the left and the
/// old-sequence token on the right.
pub(crate) fn shortest_edit<T, F>(old: &[T], new: &[T], equals: F) -> Vec<RawComponent>
where
    F: Fn(&T, &T) -> bool,
{
    let new_len = new.len() as isize;
    let old_len = old.len() as isize;
    let max_edit_length = new_len + old_len;
    let offset = max_edit_length + 1;

    // Frontier of optional paths keyed by diagonal + offset. Slots never
    // alias: the add transition moves its neighbor's path out of the slot,
    // the remove transition deep-clones the neighbor it branches from.
    let mut frontier: Vec<Option<EditPath>> = vec![None; (2 * max_edit_length + 3) as usize];

    // Edit length 0: the sequences may share a leading run.
    let mut seed = EditPath {
        new_pos: -1,
        components: Vec::new(),
    };
    let seed_old_pos = extract_common(&mut seed, old, new, 0, &equals);
    if seed.new_pos + 1 >= new_len && seed_old_pos + 1 >= old_len {
        // Identical under this equality: one unchanged run spans everything.
        if new.is_empty() {
            return Vec::new();
        }
        return vec![RawComponent {
            count: new.len(),
            added: false,
            removed: false,
        }];
    }
    frontier[offset as usize] = Some(seed);

    for edit_length in 1..=max_edit_length {
        let mut k = -edit_length;
        while k <= edit_length {
            let idx = (k + offset) as usize;

            // The add neighbor is consumed either way; nothing revisits it.
            let add_path = frontier[idx - 1].take();
            let remove_new_pos = frontier[idx + 1].as_ref().map(|path| path.new_pos);
            let old_pos = remove_new_pos.unwrap_or(0) - k;

            let can_add = add_path.as_ref().is_some_and(|path| path.new_pos + 1 < new_len);
            let can_remove = remove_new_pos.is_some() && 0 <= old_pos && old_pos < old_len;

            if !can_add && !can_remove {
                frontier[idx] = None;
                k += 2;
                continue;
            }

            // Branch from whichever neighbor is farther along the new
            // sequence, preferring the add transition on ties.
            let take_remove = !can_add
                || (can_remove
                    && match (&add_path, remove_new_pos) {
                        (Some(path), Some(neighbor_pos)) => path.new_pos < neighbor_pos,
                        _ => false,
                    });

            let mut base = if take_remove {
                let Some(mut path) = frontier[idx + 1].clone() else {
                    unreachable!("remove transition checked its neighbor");
                };
                push_component(&mut path.components, false, true);
                path
            } else {
                let Some(mut path) = add_path else {
                    unreachable!("add transition checked its taken path");
                };
                path.new_pos += 1;
                push_component(&mut path.components, true, false);
                path
            };

            let old_pos = extract_common(&mut base, old, new, k, &equals);

            if base.new_pos + 1 >= new_len && old_pos + 1 >= old_len {
                return base.components;
            }
            frontier[idx] = Some(base);
            k += 2;
        }
    }

    // Every pair of sequences differs by at most old_len + new_len edits.
    unreachable!("edit search exceeded the combined sequence length bound");
}

// Run-length merge: a step repeating the last classification extends it.
fn push_component(components: &mut Vec<RawComponent>, added: bool, removed: bool) {
    match components.last_mut() {
        Some(last) if last.added == added && last.removed == removed => last.count += 1,
        _ => components.push(RawComponent {
            count: 1,
            added,
            removed,
        }),
    }
}

// Slide through the longest run of equal tokens on this diagonal (the snake)
// and record it as an unchanged component. Returns the old-sequence cursor.
fn extract_common<T, F>(
    path: &mut EditPath,
    old: &[T],
    new: &[T],
    diagonal: isize,
    equals: &F,
) -> isize
where
    F: Fn(&T, &T) -> bool,
{
    let new_len = new.len() as isize;
    let old_len = old.len() as isize;
    let mut new_pos = path.new_pos;
    let mut old_pos = new_pos - diagonal;
    let mut common = 0usize;

    while new_pos + 1 < new_len
        && old_pos + 1 < old_len
        && equals(&new[(new_pos + 1) as usize], &old[(old_pos + 1) as usize])
    {
        new_pos += 1;
        old_pos += 1;
        common += 1;
    }

    if common > 0 {
        path.components.push(RawComponent {
            count: common,
            added: false,
            removed: false,
        });
    }

    path.new_pos = new_pos;
    old_pos
}

/// Attach joined values to raw components, apply the longest-token rule for
/// unchanged runs when the strategy asks for it, present removals before the
/// insertions they pair with, and fold an equality-ignored trailing change
/// into its predecessor.
pub(crate) fn build_values<S>(
    strategy: &S,
    raw: Vec<RawComponent>,
    new_tokens: &[String],
    old_tokens: &[String],
) -> Vec<EditComponent>
where
    S: Strategy + ?Sized,
{
    let mut components: Vec<EditComponent> = Vec::with_capacity(raw.len());
    let mut new_pos = 0usize;
    let mut old_pos = 0usize;

    for RawComponent {
        count,
        added,
        removed,
    } in raw
    {
        if removed {
            let value = strategy.join(&old_tokens[old_pos..old_pos + count]);
            old_pos += count;
            components.push(EditComponent {
                count,
                added,
                removed,
                value,
            });

            // The raw script orders an insertion before the removal it pairs
            // with; presentation order is removal first.
            let len = components.len();
            if len > 1 && components[len - 2].added {
                components.swap(len - 2, len - 1);
            }
        } else {
            let value = if !added && strategy.use_longest_token() {
                let picked = new_tokens[new_pos..new_pos + count]
                    .iter()
                    .enumerate()
                    .map(|(idx, token)| {
                        let old_token = &old_tokens[old_pos + idx];
                        if old_token.len() > token.len() {
                            old_token.clone()
                        } else {
                            token.clone()
                        }
                    })
                    .collect::<Vec<_>>();
                strategy.join(&picked)
            } else {
                strategy.join(&new_tokens[new_pos..new_pos + count])
            };
            new_pos += count;
            if !added {
                old_pos += count;
            }
            components.push(EditComponent {
                count,
                added,
                removed,
                value,
            });
        }
    }

    // A trailing pure insertion/removal whose value the strategy considers
    // equal to the empty string (an ignored whitespace token) is a no-op
    // change; fold its text into the predecessor and drop it.
    if components.len() > 1
        && components
            .last()
            .is_some_and(|last| (last.added || last.removed) && strategy.equals("", &last.value))
        && let Some(trailing) = components.pop()
        && let Some(previous) = components.last_mut()
    {
        previous.value.push_str(&trailing.value);
    }

    components
}
