//! Before/after lesson text shown by `zenbench lessons`.
//!
//! Static data only. Nothing here is measured; lessons that have a timed
//! counterpart point at it through `scenario`.

#[derive(Debug, Clone, Copy)]
pub struct Lesson {
    pub topic: &'static str,
    pub title: &'static str,
    pub scenario: Option<&'static str>,
    pub before: &'static str,
    pub after: &'static str,
    pub takeaway: &'static str,
}

pub static LESSONS: &[Lesson] = &[
    Lesson {
        topic: "membership",
        title: "Look values up in a set, not a list",
        scenario: Some("membership-test"),
        before: r#"fn contains(items: &[u32], target: u32) -> bool {
    for item in items {
        if *item == target {
            return true;
        }
    }
    false
}"#,
        after: r#"let set: HashSet<u32> = items.iter().copied().collect();
set.contains(&target)"#,
        takeaway: "A hash set answers membership in constant time; a scan grows with the data.",
    },
    Lesson {
        topic: "strings",
        title: "Join pieces once instead of concatenating in a loop",
        scenario: Some("string-assembly"),
        before: r#"let mut out = String::new();
for word in &words {
    out = format!("{} {}", out, word);
}"#,
        after: r#"let out = words.join(" ");"#,
        takeaway: "Rebuilding the string on every step copies everything built so far.",
    },
    Lesson {
        topic: "dedup",
        title: "Deduplicate with a hash set",
        scenario: Some("deduplication"),
        before: r#"let mut unique = Vec::new();
for v in &values {
    if !unique.contains(v) {
        unique.push(*v);
    }
}"#,
        after: r#"let mut seen = HashSet::new();
let unique: Vec<u32> = values.iter().copied().filter(|v| seen.insert(*v)).collect();"#,
        takeaway: "The seen-set keeps first-occurrence order and avoids the quadratic scan.",
    },
    Lesson {
        topic: "iterators",
        title: "Express filter-and-transform with iterator adapters",
        scenario: Some("filter-transform"),
        before: r#"let mut out = Vec::new();
for n in &numbers {
    if n % 2 == 0 {
        out.push(n * n);
    }
}"#,
        after: r#"let out: Vec<u64> = numbers.iter().filter(|n| *n % 2 == 0).map(|n| n * n).collect();"#,
        takeaway: "Adapters say what is computed and let `collect` size the output.",
    },
    Lesson {
        topic: "counting",
        title: "Count with the entry API",
        scenario: Some("frequency-count"),
        before: r#"let n = counts.get(word).copied().unwrap_or(0);
counts.insert(word, n + 1);"#,
        after: r#"*counts.entry(word).or_insert(0) += 1;"#,
        takeaway: "One hash lookup per word instead of two.",
    },
    Lesson {
        topic: "short-circuit",
        title: "Use any/all for yes-or-no questions",
        scenario: None,
        before: r#"let mut negative = false;
for n in &numbers {
    if *n < 0 {
        negative = true;
    }
}"#,
        after: r#"let negative = numbers.iter().any(|n| *n < 0);"#,
        takeaway: "`any` and `all` stop at the first decisive element.",
    },
    Lesson {
        topic: "laziness",
        title: "Keep pipelines lazy until you need a collection",
        scenario: None,
        before: r#"let squares: Vec<u64> = (0..1000).map(|x| x * x).collect();
let total: u64 = squares.iter().sum();"#,
        after: r#"let total: u64 = (0..1000).map(|x| x * x).sum();"#,
        takeaway: "An iterator holds no buffer; collect only when you iterate more than once.",
    },
    Lesson {
        topic: "enumerate-zip",
        title: "Enumerate and zip instead of indexing",
        scenario: None,
        before: r#"for i in 0..names.len() {
    println!("{}: {}", names[i], ages[i]);
}"#,
        after: r#"for (name, age) in names.iter().zip(&ages) {
    println!("{}: {}", name, age);
}"#,
        takeaway: "No bounds checks, no off-by-one, and mismatched lengths stop cleanly.",
    },
];

/// Closing advice printed after the lessons.
pub const MEASURE_FIRST: &str = "Measure before you optimize.";

pub fn lesson(topic: &str) -> Option<&'static Lesson> {
    LESSONS.iter().find(|l| l.topic == topic)
}
