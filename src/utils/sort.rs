use std::cmp::Ordering;

/// Stable LSD radix sort of parallel `(inds, vals)` arrays by index.
/// - Sorts by inds ascending
/// - Reorders vals accordingly
/// - Equal keys keep their input order
///
/// Complexity: 4 passes, each O(n + 256)
pub fn radix_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    assert_eq!(inds.len(), vals.len());
    let n = inds.len();
    if n <= 1 {
        return;
    }

    // Small sizes: insertion sort beats allocating scratch.
    if n <= 32 {
        insertion_sort_u32_soa(inds, vals);
        return;
    }

    let mut src: Vec<(u32, N)> = inds.iter().copied().zip(vals.iter().copied()).collect();
    let mut dst: Vec<(u32, N)> = src.clone();

    for shift in [0u32, 8, 16, 24] {
        let mut count = [0usize; 256];
        for &(k, _) in &src {
            count[((k >> shift) & 0xFF) as usize] += 1;
        }
        // all keys share this byte
        if count.iter().any(|&c| c == n) {
            continue;
        }

        let mut sum = 0usize;
        for c in count.iter_mut() {
            let tmp = *c;
            *c = sum;
            sum += tmp;
        }

        for &entry in &src {
            let b = ((entry.0 >> shift) & 0xFF) as usize;
            dst[count[b]] = entry;
            count[b] += 1;
        }
        std::mem::swap(&mut src, &mut dst);
    }

    for (i, (k, v)) in src.into_iter().enumerate() {
        inds[i] = k;
        vals[i] = v;
    }
}

fn insertion_sort_u32_soa<N: Copy>(inds: &mut [u32], vals: &mut [N]) {
    for i in 1..inds.len() {
        let mut j = i;
        while j > 0 && inds[j] < inds[j - 1] {
            inds.swap(j, j - 1);
            vals.swap(j, j - 1);
            j -= 1;
        }
    }
}

/// Ranking order: score descending, then document index ascending.
/// NaN scores sort last.
#[inline]
pub fn rank_cmp(a: (usize, f64), b: (usize, f64)) -> Ordering {
    match (a.1.is_nan(), b.1.is_nan()) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}
