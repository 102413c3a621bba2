//! In-place partition-exchange sort used to resort the agent orderings.
//!
//! Three-way (Dutch flag) partitioning around a median-of-three pivot.  Runs
//! of equal keys, which are the common case for priorities, collapse in one
//! pass instead of degrading to quadratic time.  The recursion always
//! descends into the smaller side, so stack depth is `O(log n)`.  Ordering of
//! equal elements is unspecified.

/// Sort `v` in place so that no element is `less` than its predecessor.
pub fn partition_sort_by<T, F>(v: &mut [T], less: &F)
where
    F: Fn(&T, &T) -> bool,
{
    let mut v = v;
    while v.len() > 1 {
        let (lt, gt) = partition3(v, less);
        let (head, rest) = std::mem::take(&mut v).split_at_mut(lt);
        let tail = &mut rest[gt - lt..];
        if head.len() < tail.len() {
            partition_sort_by(head, less);
            v = tail;
        } else {
            partition_sort_by(tail, less);
            v = head;
        }
    }
}

/// Partition around a pivot and return `(lt, gt)` such that `v[..lt] < p`,
/// `v[lt..gt] == p` and `v[gt..] > p`.
fn partition3<T, F>(v: &mut [T], less: &F) -> (usize, usize)
where
    F: Fn(&T, &T) -> bool,
{
    let last = v.len() - 1;
    let mid = last / 2;
    let pivot = median_of_three(v, 0, mid, last, less);
    v.swap(0, pivot);

    // v[lt..i] always holds pivot-equal elements; v[lt] is the pivot.
    let mut lt = 0;
    let mut i = 1;
    let mut gt = v.len();
    while i < gt {
        if less(&v[i], &v[lt]) {
            v.swap(i, lt);
            lt += 1;
            i += 1;
        } else if less(&v[lt], &v[i]) {
            gt -= 1;
            v.swap(i, gt);
        } else {
            i += 1;
        }
    }
    (lt, gt)
}

fn median_of_three<T, F>(v: &[T], a: usize, b: usize, c: usize, less: &F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    let ab = less(&v[a], &v[b]);
    let bc = less(&v[b], &v[c]);
    let ac = less(&v[a], &v[c]);
    if ab == bc {
        b
    } else if ab == ac {
        c
    } else {
        a
    }
}
