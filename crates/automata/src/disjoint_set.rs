// union by size with path compression
// find() and union(): O(a(n)) ~ O(1) amortized
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
    classes: usize,
}

impl DisjointSet {
    /// Every element `0..n` starts in a class of its own.
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            size: vec![1; n],
            classes: n,
        }
    }

    /// Number of elements covered by the structure.
    pub fn elements(&self) -> usize {
        self.parent.len()
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.classes
    }

    pub fn is_empty(&self) -> bool {
        self.classes == 0
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Joins the classes of `x` and `y`, returns false if they already shared one.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let mut x_repr = self.find(x);
        let mut y_repr = self.find(y);

        if x_repr == y_repr {
            return false;
        }

        if self.size[x_repr] < self.size[y_repr] {
            std::mem::swap(&mut x_repr, &mut y_repr);
        }
        self.size[x_repr] += self.size[y_repr];
        self.parent[y_repr] = x_repr;
        self.classes -= 1;
        true
    }

    /// Puts every element of `items` into one class.
    pub fn merge(&mut self, items: &[usize]) {
        if let Some((&first, rest)) = items.split_first() {
            for &item in rest {
                self.union(first, item);
            }
        }
    }

    pub fn same_class(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Classes ordered by their smallest member, members ascending.
    pub fn groups(&mut self) -> Vec<Vec<usize>> {
        let mut slot: Vec<Option<usize>> = vec![None; self.elements()];
        let mut groups: Vec<Vec<usize>> = Vec::with_capacity(self.classes);

        for x in 0..self.elements() {
            let root = self.find(x);
            match slot[root] {
                Some(i) => groups[i].push(x),
                None => {
                    slot[root] = Some(groups.len());
                    groups.push(vec![x]);
                }
            }
        }

        groups
    }

    /// The distinguished member of each class, in the same order as `groups`.
    pub fn representatives(&mut self) -> Vec<usize> {
        self.groups()
            .iter()
            .map(|group| self.find(group[0]))
            .collect()
    }
}
