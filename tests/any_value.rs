//! Behavioral tests for the public [`AnyValue`] API.

use std::{
    any::TypeId,
    cell::RefCell,
    collections::HashMap,
    fmt,
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};

use anyslot::prelude::*;

fn assert_round_trip<T>(value: T)
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    let container = AnyValue::new(value.clone());
    assert_eq!(container.value::<T>(), Ok(&value));
    assert_eq!(container.type_id(), Some(TypeId::of::<T>()));
    assert_eq!(container.type_name(), Some(std::any::type_name::<T>()));
    assert_eq!(container.into_value::<T>().ok(), Some(value));
}

#[test]
fn test_round_trip_of_various_types() {
    assert_round_trip(42_i32);
    assert_round_trip(u128::MAX);
    assert_round_trip(-0.25_f64);
    assert_round_trip(true);
    assert_round_trip("static str");
    assert_round_trip(String::from("owned string"));
    assert_round_trip(vec![Some(1_u8), None]);
    assert_round_trip((1_u16, 'x', "tuple"));
    assert_round_trip(HashMap::from([("key", 1.5_f32)]));
    assert_round_trip(());
}

#[test]
fn test_example_scenario() {
    let number = AnyValue::new(42_i32);
    assert_eq!(number.value::<i32>(), Ok(&42));
    assert_eq!(
        number.value::<f64>(),
        Err(ValueError::TypeMismatch {
            requested: "f64",
            stored: "i32",
        })
    );

    let a = AnyValue::new(String::from("hello"));
    let mut b = a.clone();
    *b.value_mut::<String>().unwrap() = String::from("world");
    assert_eq!(a.value::<String>().unwrap(), "hello");
    assert_eq!(b.value::<String>().unwrap(), "world");
}

#[test]
fn test_convertible_types_are_rejected() {
    let value = AnyValue::new(7_i32);
    for result in [
        value.value::<i64>().map(|_| ()),
        value.value::<u32>().map(|_| ()),
        value.value::<i16>().map(|_| ()),
        value.value::<f32>().map(|_| ()),
        value.value::<isize>().map(|_| ()),
    ] {
        assert!(matches!(result, Err(ValueError::TypeMismatch { stored: "i32", .. })));
    }

    let wide = AnyValue::new(7_i64);
    assert!(wide.as_i32().is_err());
    assert!(i32::try_from(&wide).is_err());
}

#[test]
fn test_trait_objects_are_exact_too() {
    trait Shape {
        fn area(&self) -> f64;
    }

    #[derive(Clone)]
    struct Square(f64);

    impl Shape for Square {
        fn area(&self) -> f64 {
            self.0 * self.0
        }
    }

    let shape: Rc<dyn Shape> = Rc::new(Square(2.0));
    let value = AnyValue::new(Rc::clone(&shape));

    assert!(value.value::<Square>().is_err());
    assert!(value.value::<Rc<Square>>().is_err());
    let stored = value.value::<Rc<dyn Shape>>().unwrap();
    assert!((stored.area() - 4.0).abs() < f64::EPSILON);
}

#[test]
fn test_copy_independence_both_directions() {
    let mut a = AnyValue::new(vec![1, 2, 3]);
    let mut b = a.clone();

    b.value_mut::<Vec<i32>>().unwrap().push(4);
    assert_eq!(a.value::<Vec<i32>>(), Ok(&vec![1, 2, 3]));

    a.value_mut::<Vec<i32>>().unwrap().clear();
    assert_eq!(b.value::<Vec<i32>>(), Ok(&vec![1, 2, 3, 4]));
}

#[test]
fn test_clone_of_shared_payload_shares_only_what_the_payload_shares() {
    // Deep copies clone the payload with its own `Clone`, so a payload that is
    // itself a shared handle stays shared.
    let log = Rc::new(RefCell::new(Vec::<&'static str>::new()));
    let a = AnyValue::new(Rc::clone(&log));
    let b = a.clone();

    b.value::<Rc<RefCell<Vec<&'static str>>>>()
        .unwrap()
        .borrow_mut()
        .push("from b");
    assert_eq!(*log.borrow(), ["from b"]);
    assert_eq!(Rc::strong_count(&log), 3);
}

#[test]
fn test_move_invalidates_source() {
    let mut a = AnyValue::new(String::from("payload"));
    let b = a.take();

    assert!(a.is_empty());
    assert_eq!(a.value::<String>(), Err(ValueError::Empty));
    assert_eq!(a.type_name(), None);
    assert_eq!(b.value::<String>().map(String::as_str), Ok("payload"));

    a.clone_from(&b);
    assert_eq!(a.value::<String>().map(String::as_str), Ok("payload"));
}

#[test]
fn test_failed_extraction_leaves_container_unchanged() {
    let mut value = AnyValue::new(1_u8);
    let type_id = value.type_id();

    assert!(value.value_mut::<u16>().is_err());
    assert!(value.value::<char>().is_err());
    let value = value.into_value::<i8>().unwrap_err();

    assert_eq!(value.type_id(), type_id);
    assert_eq!(value.value::<u8>(), Ok(&1));
}

#[test]
fn test_panicking_clone_leaves_target_intact() {
    /// Payload whose `Clone` always panics.
    struct Unclonable;

    impl Clone for Unclonable {
        fn clone(&self) -> Self {
            panic!("Unclonable cannot be cloned");
        }
    }

    let source = AnyValue::new(Unclonable);
    let mut target = AnyValue::new(5_i32);

    let result = panic::catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));
    assert!(result.is_err());
    assert_eq!(target.value::<i32>(), Ok(&5));
    assert!(source.is::<Unclonable>());

    let result = panic::catch_unwind(AssertUnwindSafe(|| source.clone()));
    assert!(result.is_err());
    assert!(source.is::<Unclonable>());
}

#[test]
fn test_errors_propagate_with_question_mark() {
    fn total(values: &[AnyValue]) -> Result<i32, ValueError> {
        let mut total = 0;
        for value in values {
            total += value.as_i32()?;
        }
        Ok(total)
    }

    let mut values = vec![AnyValue::new(1_i32), AnyValue::new(2_i32)];
    assert_eq!(total(&values), Ok(3));

    values.push(AnyValue::new(3_u32));
    assert_eq!(
        total(&values),
        Err(ValueError::TypeMismatch {
            requested: "i32",
            stored: "u32",
        })
    );
}
