use std::cmp::Reverse;

use super::data::Idea;

/// Pinned ideas first, then most votes. The sort is stable, so ties stay in
/// insertion order.
pub fn sort_ideas(ideas: &mut [Idea]) {
    ideas.sort_by_key(|idea| (Reverse(idea.pinned), Reverse(idea.votes)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(id: i64, pinned: bool, votes: u32) -> Idea {
        Idea {
            id,
            title: format!("idea {}", id),
            description: String::new(),
            category: String::new(),
            votes,
            pinned,
        }
    }

    fn order(ideas: &[Idea]) -> Vec<i64> {
        ideas.iter().map(|idea| idea.id).collect()
    }

    #[test]
    fn pinned_first_then_votes_descending() {
        let mut ideas = vec![idea(1, false, 5), idea(2, true, 1), idea(3, false, 10)];

        sort_ideas(&mut ideas);

        assert_eq!(order(&ideas), vec![2, 3, 1]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut ideas = vec![
            idea(1, false, 3),
            idea(2, true, 3),
            idea(3, false, 3),
            idea(4, true, 3),
        ];

        sort_ideas(&mut ideas);

        assert_eq!(order(&ideas), vec![2, 4, 1, 3]);
    }

    #[test]
    fn pinned_ideas_sort_by_votes_among_themselves() {
        let mut ideas = vec![idea(1, true, 1), idea(2, true, 7)];

        sort_ideas(&mut ideas);

        assert_eq!(order(&ideas), vec![2, 1]);
    }
}
