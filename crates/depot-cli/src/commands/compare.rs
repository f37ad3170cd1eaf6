//! Handler for `depot compare`.

use std::cmp::Ordering;

use depot_resolver::version::VersionComparator;
use miette::Result;

pub fn exec(left: &str, right: &str) -> Result<()> {
    let symbol = match VersionComparator.compare(left, right) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    println!("{left} {symbol} {right}");
    Ok(())
}
