use std::cmp::Ordering;
use crate::models::Branch;

/// Keep branches rated at or above `min_rating`. Unrated branches are dropped.
pub fn with_min_rating(branches: Vec<Branch>, min_rating: f64) -> Vec<Branch> {
    branches
        .into_iter()
        .filter(|b| b.rating.is_some_and(|r| r >= min_rating))
        .collect()
}

/// Order by rating, best first. Unrated branches go last and equal ratings
/// keep their original order.
pub fn sort_by_rating_desc(branches: &mut [Branch]) {
    branches.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use chrono::Utc;

    fn create_branch(id: i64, rating: Option<f64>) -> Branch {
        Branch {
            id,
            name: format!("Branch {}", id),
            address: "Calle 119 # 7-14".to_string(),
            location: GeoPoint::new(4.6975, -74.0337),
            rating,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_min_rating_filter() {
        let branches = vec![
            create_branch(1, Some(4.8)),
            create_branch(2, Some(3.5)),
            create_branch(3, Some(2.0)),
            create_branch(4, None),
        ];

        let ids: Vec<i64> = with_min_rating(branches.clone(), 4.0).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1]);

        let ids: Vec<i64> = with_min_rating(branches, 3.0).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_sort_by_rating() {
        let mut branches = vec![
            create_branch(1, None),
            create_branch(2, Some(3.9)),
            create_branch(3, Some(4.6)),
            create_branch(4, Some(3.9)),
        ];

        sort_by_rating_desc(&mut branches);

        let ids: Vec<i64> = branches.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }
}
