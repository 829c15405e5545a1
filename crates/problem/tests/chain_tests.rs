use problem::{as_type, chain, join, wrap, Cause, Kind, PlainError, Problem};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("request failed")]
struct RequestError(#[source] Cause);

#[derive(Debug, Error)]
#[error("io: {0}")]
struct IoError(String);

fn root_problem() -> Problem {
    Problem::draft(Kind::Unavailable, "Unavailable")
        .with_message("store offline")
        .with_cause(wrap(IoError("refused".to_string())))
        .make()
}

#[test]
fn test_as_type_finds_problem_through_repeated_wrapping() {
    let root = root_problem();
    let mut err = RequestError(Cause::from(root.clone()));
    for _ in 0..5 {
        err = RequestError(wrap(err));
    }

    let found = as_type::<Problem>(&err).expect("problem in chain");
    assert!(found.ptr_eq(&root));
    assert_eq!(found.kind(), Kind::Unavailable);
}

#[test]
fn test_as_type_returns_outermost_match() {
    let inner = root_problem();
    let outer = Problem::draft(Kind::BadGateway, "Bad Gateway")
        .with_message("upstream failed")
        .with_cause(inner.clone())
        .make();

    let found = as_type::<Problem>(&outer).expect("problem");
    assert!(found.ptr_eq(&outer));
    assert!(!found.ptr_eq(&inner));
}

#[test]
fn test_as_type_finds_foreign_leaf() {
    let err = RequestError(Cause::from(root_problem()));
    let io = as_type::<IoError>(&err).expect("leaf");
    assert_eq!(io.0, "refused");
}

#[test]
fn test_as_type_absent() {
    let err = RequestError(wrap(PlainError::new("plain")));
    assert!(as_type::<Problem>(&err).is_none());
    assert!(as_type::<IoError>(&err).is_none());
}

#[test]
fn test_as_type_does_not_descend_into_aggregates() {
    let multi = join([Some(root_problem())]).expect("one error");
    let err = RequestError(Cause::from(multi));
    assert!(as_type::<Problem>(&err).is_none());
}

#[test]
fn test_chain_walks_every_level() {
    let err = RequestError(Cause::from(root_problem()));
    let rendered: Vec<String> = chain(&err).map(|e| e.to_string()).collect();
    assert_eq!(
        rendered,
        [
            "request failed",
            "store offline: io: refused",
            "store offline: io: refused",
            "io: refused",
        ]
    );
    assert!(chain(&err).nth(1).is_some_and(|e| e.is::<Cause>()));
    assert!(chain(&err).last().and_then(|e| e.source()).is_none());
}
