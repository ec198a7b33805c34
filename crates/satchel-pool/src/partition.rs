/// Split `s` into at most `n` parts of near-equal length, larger parts first.
///
/// Fewer than `n` parts are returned when `s` is shorter than `n`; an empty
/// slice or `n == 0` gives no parts.
pub fn chunk<T>(s: &[T], n: usize) -> Vec<&[T]> {
    if s.is_empty() || n == 0 {
        return Vec::new();
    }

    let base = s.len() / n;
    let big = s.len() % n;
    let mut parts = Vec::with_capacity(n.min(s.len()));
    let mut rest = s;
    for i in 0..n {
        let size = if i < big { base + 1 } else { base };
        if size == 0 {
            break;
        }
        let (part, tail) = rest.split_at(size);
        parts.push(part);
        rest = tail;
    }
    parts
}

/// Split `s` into consecutive parts of `size` elements; the last may be shorter.
pub fn partition<T>(s: &[T], size: usize) -> Vec<&[T]> {
    if size == 0 {
        return Vec::new();
    }
    s.chunks(size).collect()
}
