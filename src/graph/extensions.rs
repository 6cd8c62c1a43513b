use crate::graph::{amplify::Amplify, node::GraphNode, through::Through};

pub trait NodeExt: GraphNode + Sized {
    fn amplify<M: GraphNode>(self, gain: M) -> Amplify<Self, M> {
        Amplify::new(self, gain)
    }

    fn through<F: GraphNode>(self, effect: F) -> Through<Self, F> {
        Through::new(self, effect)
    }
}

impl<T: GraphNode> NodeExt for T {}
