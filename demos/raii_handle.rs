//! Using `OwningPtr` on its own as a move-only owner of a heap resource.
//!
//! The resource prints when it is created and released, so the output shows
//! exactly when ownership ends.

use anyslot::OwningPtr;

struct Sample(&'static str);

impl Sample {
    fn new(name: &'static str) -> Self {
        println!("create {name}");
        Self(name)
    }
}

impl Drop for Sample {
    fn drop(&mut self) {
        println!("delete {}", self.0);
    }
}

fn main() {
    let mut owner = OwningPtr::new(Sample::new("A"));

    println!("-- moving A to another owner");
    let mut other = owner.take();
    println!("first owner empty: {}", owner.is_empty());

    println!("-- self-assignment keeps A alive");
    let moved = other.take();
    other.assign(moved);
    println!("still owning: {}", other.0);

    println!("-- assigning B releases A");
    other.assign(OwningPtr::new(Sample::new("B")));

    println!("-- end of scope releases B");
}
