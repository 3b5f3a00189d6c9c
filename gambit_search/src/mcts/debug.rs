use super::*;

impl<G: Game> NodeData<G> {
    fn debug_description(&self, children_count: usize) -> String {
        let action_part = match self.action {
            Some(action) => format!("{action:?}"),
            None => "[Root]".to_string(),
        };
        format!(
            "{action_part} (visits={}, score={:.0}, mean={:.2}) owner={} #children={}",
            self.visits,
            self.score,
            self.mean_score(),
            self.owner,
            children_count
        )
    }
}

impl<G: Game> Mcts<G> {
    /// Print the subtree under `token` down to `max_depth`, omitting
    /// children visited fewer than `min_visits` times (except directly under
    /// the root).
    pub fn print_tree(&self, token: Token, depth: u8, max_depth: u8, min_visits: u32) {
        if depth > max_depth {
            return;
        }

        let Some(node) = self.tree.get(token) else {
            return;
        };

        fn indent_prefix(indent_depth: u8) -> String {
            let mut s = String::new();
            for _ in 0..indent_depth {
                s += "  ";
            }
            s += "- ";
            s
        }

        let children_count = node.children(&self.tree).count();
        println!(
            "{}{}",
            indent_prefix(depth),
            node.data.debug_description(children_count)
        );

        let mut children: SmallVec<[_; 16]> = node.children(&self.tree).collect();
        children.sort_by_key(|c| std::cmp::Reverse(c.data.visits));
        let mut omitted = 0;
        for child in children {
            if depth == 0 || child.data.visits >= min_visits {
                self.print_tree(child.token(), depth + 1, max_depth, min_visits);
            } else {
                omitted += 1;
            }
        }
        if omitted > 0 {
            println!("{}...[{omitted} omitted]", indent_prefix(depth + 1));
        }
    }
}
