use scalargrad_core::{Graph, GraphBuilder, NodeId, Op};

// Not every test binary uses every helper.
#[allow(dead_code)]
pub fn single_op_graph(op: Op, arity: usize) -> (Graph<f64>, Vec<NodeId>) {
    let mut builder = GraphBuilder::new();
    let inputs: Vec<NodeId> = (0..arity)
        .map(|i| builder.input(format!("x{}", i)))
        .collect();
    let node = builder.op(op.name(), op, &inputs);
    builder.output("out", node);
    let graph = builder.build().expect("single op graph should be valid");
    (graph, inputs)
}

/// `f(x, y, z) = (x + y) * z`, inputs in that order.
#[allow(dead_code)]
pub fn composite_graph() -> (Graph<f64>, [NodeId; 3]) {
    let mut builder = GraphBuilder::new();
    let x = builder.input("x");
    let y = builder.input("y");
    let z = builder.input("z");
    let sum = builder.add("sum", &[x, y]);
    let prod = builder.multiply("prod", &[sum, z]);
    builder.output("f", prod);
    let graph = builder.build().expect("composite graph should be valid");
    (graph, [x, y, z])
}

/// A linear fit target: two points on `y = 2x + 1`.
#[allow(dead_code)]
pub fn line_samples() -> Vec<(Vec<f64>, Vec<f64>)> {
    vec![(vec![-1.5], vec![-2.0]), (vec![1.5], vec![4.0])]
}
