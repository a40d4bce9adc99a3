use automata::{
    closure_star, concatenate, minimize, nfa_to_dfa, union, vocabulary, Dfa, FiniteAutomaton, Nfa,
};

fn run_vectors(tests: &[(&str, bool)], dfa: &Dfa<char>, name: &str) {
    for (test, expected_result) in tests {
        let result = dfa.recognize(test.chars());
        assert_eq!(
            result, *expected_result,
            "'{}' failed on input '{}', expect match: {}, actual match: {}",
            name, test, expected_result, result
        );
    }
}

// every word over `alphabet` of length <= max_len, shortest first
fn words(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|prefix| {
                alphabet.iter().map(move |c| {
                    let mut word = prefix.clone();
                    word.push(*c);
                    word
                })
            })
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

fn literal(text: &str) -> Nfa<char> {
    let mut chars = text.chars();
    let first = Nfa::symbol(chars.next().expect("literal must be nonempty"));
    chars.fold(first, |nfa, c| concatenate(&nfa, &Nfa::symbol(c)))
}

fn a_or_b() -> Nfa<char> {
    union(&Nfa::symbol('a'), &Nfa::symbol('b'))
}

// (a|b)*abb
fn dragon_book() -> Nfa<char> {
    concatenate(&closure_star(&a_or_b()), &literal("abb"))
}

fn assert_same_language(
    expected: impl Fn(&str) -> bool,
    dfa: &Dfa<char>,
    alphabet: &[char],
    name: &str,
) {
    for word in words(alphabet, 6) {
        assert_eq!(
            dfa.recognize(word.chars()),
            expected(&word),
            "'{}' disagrees on input '{}'",
            name,
            word
        );
    }
}

#[test]
fn a_star_b() {
    let dfa = Dfa::from_table(2, [1], [((0, 'a'), 0), ((0, 'b'), 1)], 0).unwrap();

    let test_vectors = [
        ("b", true),
        ("aab", true),
        ("", false),
        ("a", false),
        ("ba", false),
    ];

    run_vectors(&test_vectors, &dfa, "a*b");
}

#[test]
fn recognize_leaves_no_state_behind() {
    let dfa = Dfa::from_table(2, [1], [((0, 'a'), 0), ((0, 'b'), 1)], 0).unwrap();

    // a failed run must not affect the next one
    assert!(!dfa.recognize("ba".chars()));
    assert!(dfa.recognize("b".chars()));
    assert!(!dfa.recognize("x".chars()));
    assert!(dfa.recognize("ab".chars()));
    assert!(dfa.recognize("ab".chars()));
}

#[test]
fn recognize_is_shareable_across_threads() {
    let dfa = Dfa::from_table(2, [1], [((0, 'a'), 0), ((0, 'b'), 1)], 0).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert!(dfa.recognize("aaab".chars()));
                    assert!(!dfa.recognize("aaba".chars()));
                }
            });
        }
    });
}

#[test]
fn minimize_merges_equivalent_states() {
    // 1 and 2 have identical futures
    let dfa = Dfa::from_table(
        4,
        [3],
        [
            ((0, 'a'), 1),
            ((0, 'b'), 2),
            ((1, 'a'), 3),
            ((1, 'b'), 3),
            ((2, 'a'), 3),
            ((2, 'b'), 3),
            ((3, 'a'), 3),
            ((3, 'b'), 3),
        ],
        0,
    )
    .unwrap();

    let minimized = minimize(&dfa);
    assert!(minimized.states() <= 3);
    assert_eq!(minimized.start(), 0);

    for test in ["", "a", "aa", "ab", "ba"] {
        assert_eq!(
            minimized.recognize(test.chars()),
            dfa.recognize(test.chars()),
            "minimized dfa disagrees on '{}'",
            test
        );
    }

    let test_vectors = [("", false), ("a", false), ("aa", true), ("ab", true), ("ba", true)];
    run_vectors(&test_vectors, &minimized, "minimized");
}

#[test]
fn minimize_is_idempotent() {
    let dfa = dragon_book().to_dfa();
    let once = minimize(&dfa);
    let twice = minimize(&once);

    assert!(once.states() <= dfa.states());
    assert_eq!(once.states(), twice.states());
    assert_eq!(once, twice);
}

#[test]
fn dragon_book_minimal_size() {
    let nfa = dragon_book();
    let dfa = nfa_to_dfa(&nfa);
    let minimized = dfa.minimize();

    assert_eq!(minimized.states(), 4);
    assert_same_language(|w| w.ends_with("abb"), &minimized, &['a', 'b'], "(a|b)*abb");
}

#[test]
fn nfa_and_dfa_agree() {
    let nfas = [
        ("(a|b)*abb", dragon_book()),
        ("a*b", concatenate(&closure_star(&Nfa::symbol('a')), &Nfa::symbol('b'))),
        ("(ab|a)*", closure_star(&union(&literal("ab"), &Nfa::symbol('a')))),
        ("(a*)*", closure_star(&closure_star(&Nfa::symbol('a')))),
        ("ab|ba|c", union(&union(&literal("ab"), &literal("ba")), &Nfa::symbol('c'))),
    ];

    for (name, nfa) in &nfas {
        let dfa = nfa.to_dfa();
        let minimized = dfa.minimize();
        assert!(minimized.states() <= dfa.states());

        for word in words(&['a', 'b', 'c'], 5) {
            let expected = nfa.recognize(word.chars());
            assert_eq!(dfa.recognize(word.chars()), expected, "'{}' dfa on '{}'", name, word);
            assert_eq!(
                minimized.recognize(word.chars()),
                expected,
                "'{}' minimized on '{}'",
                name,
                word
            );
        }
    }
}

#[test]
fn subset_construction_is_deterministic() {
    let dfa = dragon_book().to_dfa();

    let mut seen = std::collections::HashSet::new();
    for (origin, symbol, _) in dfa.transitions() {
        assert!(seen.insert((origin, *symbol)), "two transitions for ({}, {:?})", origin, symbol);
    }
    for state in 0..dfa.states() {
        assert!(dfa.epsilon_transitions(state).is_empty());
        for symbol in vocabulary(&dfa) {
            assert!(dfa.transitions_from(state, symbol).len() <= 1);
        }
    }
}

#[test]
fn union_semantics() {
    let a = literal("ab");
    let b = closure_star(&Nfa::symbol('b'));
    let dfa = union(&a, &b).to_dfa();

    assert_same_language(
        |w| w == "ab" || w.chars().all(|c| c == 'b'),
        &dfa,
        &['a', 'b'],
        "ab|b*",
    );
    assert!(vocabulary(&dfa).iter().eq(['a', 'b'].iter()));
}

#[test]
fn concatenation_semantics() {
    let a = closure_star(&Nfa::symbol('a'));
    let b = union(&Nfa::symbol('b'), &literal("ba"));
    let dfa = concatenate(&a, &b).to_dfa();

    assert_same_language(
        |w| {
            (0..=w.len()).any(|i| {
                let (w1, w2) = w.split_at(i);
                w1.chars().all(|c| c == 'a') && (w2 == "b" || w2 == "ba")
            })
        },
        &dfa,
        &['a', 'b'],
        "a*(b|ba)",
    );
}

#[test]
fn closure_accepts_empty_and_repeats() {
    let dfa = closure_star(&literal("ab")).to_dfa();

    let test_vectors = [
        ("", true),
        ("ab", true),
        ("abab", true),
        ("a", false),
        ("aba", false),
        ("ba", false),
    ];

    run_vectors(&test_vectors, &dfa, "(ab)*");
}

#[test]
fn dfa_composes_through_nfa() {
    let a_star_b = Dfa::from_table(2, [1], [((0, 'a'), 0), ((0, 'b'), 1)], 0).unwrap();
    let dfa = concatenate(&a_star_b.to_nfa(), &Nfa::from(&a_star_b)).to_dfa();

    let test_vectors = [("bb", true), ("abaab", true), ("b", false), ("ab", false)];
    run_vectors(&test_vectors, &dfa, "a*ba*b");
}

#[test]
fn token_alphabet() {
    // num ( '+' num )*
    let num = Nfa::symbol("num");
    let plus_num = concatenate(&Nfa::symbol("+"), &Nfa::symbol("num"));
    let dfa = concatenate(&num, &closure_star(&plus_num)).to_dfa().minimize();

    assert_eq!(dfa.states(), 2);
    assert!(dfa.recognize(["num"]));
    assert!(dfa.recognize(["num", "+", "num", "+", "num"]));
    assert!(!dfa.recognize(["num", "+"]));
    assert!(!dfa.recognize(["+", "num"]));
    assert!(!dfa.recognize(Vec::<&str>::new()));
}

#[test]
fn pruning_unreachable_states() {
    // state 2 can never be entered and behaves like state 1
    let dfa = Dfa::from_table(
        3,
        [1, 2],
        [((0, 'a'), 1), ((2, 'b'), 2)],
        0,
    )
    .unwrap();

    let pruned = dfa.without_unreachable();
    assert_eq!(pruned.states(), 2);
    assert_eq!(pruned.reachable_states().len(), 2);
    assert!(pruned.recognize("a".chars()));
    assert!(!pruned.recognize("ab".chars()));

    // minimization keeps the unreachable state around as its own class
    assert_eq!(minimize(&dfa).states(), 3);
    assert_eq!(minimize(&pruned).states(), 2);
}
