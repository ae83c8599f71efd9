use std::ops::Add;

// Running total, each entry inclusive of its own element.
pub fn cumsum<T>(seq: &[T]) -> Vec<T>
where
    T: Copy + Default + Add<Output = T>,
{
    seq.iter()
        .scan(T::default(), |total, &x| {
            *total = *total + x;
            Some(*total)
        })
        .collect::<Vec<T>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumsum() {
        let seq: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result: Vec<f64> = cumsum(&seq);
        let expected: Vec<f64> = vec![1.0, 3.0, 6.0, 10.0, 15.0];
        assert_eq!(result, expected);
    }

    #[test]
    fn test_cumsum_empty() {
        let seq: Vec<u64> = vec![];
        let result: Vec<u64> = cumsum(&seq);
        assert!(result.is_empty());
    }

    #[test]
    fn test_cumsum_counts() {
        let seq: Vec<u64> = vec![1, 1, 2, 3, 3, 3, 3, 2, 1, 1];
        let result: Vec<u64> = cumsum(&seq);
        let expected: Vec<u64> = vec![1, 2, 4, 7, 10, 13, 16, 18, 19, 20];
        assert_eq!(result, expected);
    }
}
