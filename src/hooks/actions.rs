//! Fine-grained action names per enumerable resource, and the set of them a
//! caller may perform.
//!
//! On the wire an action set is a plain string array. The literal `"all"` is the
//! wildcard and is only ever produced alone.

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire literal for [`ActionSet::All`].
pub const WILDCARD: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action `{0}`")]
pub struct UnknownAction(pub String);

/// An action name that can appear in an [`ActionSet`].
pub trait Action: Copy + Ord + fmt::Debug + FromStr<Err = UnknownAction> + Send + Sync + 'static {
    /// Every action of this resource type.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;
}

macro_rules! actions {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl Action for $name {
            const ALL: &'static [Self] = &[$($name::$variant,)+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownAction;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownAction(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

actions!(
    /// Actions on a topic.
    TopicAction {
        SeeTopic => "seeTopic",
        CreateTopic => "createTopic",
        EditTopicConfig => "editTopicConfig",
        DeleteTopic => "deleteTopic",
        PublishTopicRecords => "publishTopicRecords",
        DeleteTopicRecords => "deleteTopicRecords",
        ViewPartitions => "viewPartitions",
        ViewConfig => "viewConfig",
        ViewMessages => "viewMessages",
        UseSearchFilter => "useSearchFilter",
        ViewConsumers => "viewConsumers",
    }
);

actions!(
    /// Actions on a consumer group.
    ConsumerGroupAction {
        SeeConsumerGroup => "seeConsumerGroup",
        EditConsumerGroup => "editConsumerGroup",
        DeleteConsumerGroup => "deleteConsumerGroup",
    }
);

actions!(
    /// Actions on a Kafka Connect cluster.
    ConnectClusterAction {
        ViewConnectCluster => "viewConnectCluster",
        EditConnectCluster => "editConnectCluster",
        DeleteConnectCluster => "deleteConnectCluster",
    }
);

/// What a caller may do with a single resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionSet<A: Action> {
    /// Every action, including ones added in the future.
    All,
    Only(BTreeSet<A>),
}

impl<A: Action> ActionSet<A> {
    pub fn only(actions: impl IntoIterator<Item = A>) -> Self {
        Self::Only(actions.into_iter().collect())
    }

    pub fn none() -> Self {
        Self::Only(BTreeSet::new())
    }

    pub fn permits(&self, action: A) -> bool {
        match self {
            ActionSet::All => true,
            ActionSet::Only(actions) => actions.contains(&action),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ActionSet::All)
    }

    /// Concrete actions covered by this set.
    pub fn expand(&self) -> Vec<A> {
        match self {
            ActionSet::All => A::ALL.to_vec(),
            ActionSet::Only(actions) => actions.iter().copied().collect(),
        }
    }
}

impl<A: Action> Default for ActionSet<A> {
    fn default() -> Self {
        ActionSet::All
    }
}

impl<A: Action> Serialize for ActionSet<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ActionSet::All => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(WILDCARD)?;
                seq.end()
            }
            ActionSet::Only(actions) => {
                let mut seq = serializer.serialize_seq(Some(actions.len()))?;
                for action in actions {
                    seq.serialize_element(action.as_str())?;
                }
                seq.end()
            }
        }
    }
}

impl<'de, A: Action> Deserialize<'de> for ActionSet<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ActionSetVisitor<A>(PhantomData<A>);

        impl<'de, A: Action> Visitor<'de> for ActionSetVisitor<A> {
            type Value = ActionSet<A>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of action names")
            }

            fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
                let mut actions = BTreeSet::new();
                let mut wildcard = false;
                while let Some(name) = seq.next_element::<String>()? {
                    if name == WILDCARD {
                        wildcard = true;
                        continue;
                    }
                    actions.insert(name.parse::<A>().map_err(de::Error::custom)?);
                }

                // The wildcard wins over anything listed next to it.
                if wildcard {
                    Ok(ActionSet::All)
                } else {
                    Ok(ActionSet::Only(actions))
                }
            }
        }

        deserializer.deserialize_seq(ActionSetVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wildcard_serializes_as_all_literal() {
        let set: ActionSet<TopicAction> = ActionSet::All;
        assert_eq!(serde_json::to_value(&set).unwrap(), json!(["all"]));
    }

    #[test]
    fn explicit_set_serializes_names_in_order() {
        let set = ActionSet::only([TopicAction::ViewMessages, TopicAction::SeeTopic]);
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!(["seeTopic", "viewMessages"])
        );
    }

    #[test]
    fn mixed_wildcard_collapses_to_all() {
        let set: ActionSet<ConsumerGroupAction> =
            serde_json::from_value(json!(["editConsumerGroup", "all"])).unwrap();
        assert!(set.is_all());
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result: Result<ActionSet<ConnectClusterAction>, _> =
            serde_json::from_value(json!(["restartConnector"]));
        assert!(result.is_err());
    }

    #[test]
    fn permits_and_expand() {
        let set = ActionSet::only([ConnectClusterAction::ViewConnectCluster]);
        assert!(set.permits(ConnectClusterAction::ViewConnectCluster));
        assert!(!set.permits(ConnectClusterAction::DeleteConnectCluster));
        assert_eq!(set.expand(), vec![ConnectClusterAction::ViewConnectCluster]);

        let all: ActionSet<ConnectClusterAction> = ActionSet::All;
        assert_eq!(all.expand().len(), ConnectClusterAction::ALL.len());
        assert!(ActionSet::<TopicAction>::none().expand().is_empty());
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for action in TopicAction::ALL {
            assert_eq!(action.as_str().parse::<TopicAction>(), Ok(*action));
        }
    }
}
