//! Walkthrough of the free pipeline: eligibility, finalizers, poisoning.

use reclaim::{Builtin, Heap, Value};

fn main() {
    let heap = Heap::with_defaults();

    // A text object lives until it is explicitly force-freed.
    let greeting = heap.alloc_text("hello");
    println!("alive before free: {}", heap.is_live(greeting));

    heap.free(Value::Obj(greeting)).unwrap();
    println!("resolve after free: {:?}", heap.resolve(greeting));

    // A finalizer hook runs against the pre-free object; its result is
    // what `free` returns.
    let widget = heap.define_descriptor("Widget");
    let killed = heap.intern("killed");
    let record = heap.alloc_record(widget, &[]).unwrap();
    heap.set_finalizer(record, move |_| Ok(Value::Sym(killed)))
        .unwrap();
    println!("free with hook: {:?}", heap.free(Value::Obj(record)));

    // Immediates and descriptors are never eligible.
    println!("free(10): {:?}", heap.free(Value::Int(10)));
    println!(
        "free(Class): {:?}",
        heap.free(Value::Obj(heap.builtin(Builtin::Class)))
    );

    println!("\n{}", heap.stats());
}
