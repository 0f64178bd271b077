//! Basic introduction to anyslot.
//!
//! This example demonstrates the fundamental concepts:
//! 1. Storing values of different types in one `AnyValue`
//! 2. Extracting them with an exact type
//! 3. Deep copies that never share storage
//! 4. Moving a value out and what is left behind

use anyslot::prelude::*;

fn main() -> Result<(), ValueError> {
    println!("=== Storing and extracting ===\n");

    let mut value = AnyValue::new('c');
    println!("{value:?} holds {:?}", value.value::<char>()?);

    value.set(1_i32);
    let number: i32 = i32::try_from(&value)?;
    println!("{value:?} holds {number}");

    value.set("1243");
    println!("{value:?} holds {:?}", value.value::<&str>()?);

    // Only the exact type comes back out
    match value.as_i32() {
        Ok(number) => println!("unexpected number: {number}"),
        Err(error) => println!("as_i32 failed: {error}"),
    }
    println!();

    println!("=== Deep copies ===\n");

    let original = AnyValue::new(String::from("hello"));
    let mut copy = original.clone();
    copy.value_mut::<String>()?.replace_range(.., "world");
    println!("original: {}", original.value::<String>()?);
    println!("copy:     {}", copy.value::<String>()?);
    println!();

    println!("=== Moving out ===\n");

    let mut source = AnyValue::new(vec![1, 2, 3]);
    let target = source.take();
    println!("target: {:?}", target.value::<Vec<i32>>()?);
    println!("source: {source:?}");
    if let Err(error) = source.value::<Vec<i32>>() {
        println!("source.value() failed: {error}");
    }

    Ok(())
}
