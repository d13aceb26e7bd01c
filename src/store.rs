use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{Level, event, instrument};

use crate::types::{
    driving_tip::{DrivingTip, DrivingTipId, NewDrivingTip},
    question::{NewQuestion, Question, QuestionId},
    resource::{NewResource, Resource, ResourceId},
    state::{NewState, State, StateId},
    user::{NewUser, User, UserId},
};

use handle_errors::Error;

/// In-memory content store shared by every request handler.
///
/// Cloning the store clones the handles, not the data. Records are keyed by
/// ids handed out in insertion order and are never deleted, so iterating a
/// collection yields records in the order they were created.
#[derive(Debug, Clone, Default)]
pub struct Store {
    states: Arc<RwLock<BTreeMap<StateId, State>>>,
    questions: Arc<RwLock<BTreeMap<QuestionId, Question>>>,
    resources: Arc<RwLock<BTreeMap<ResourceId, Resource>>>,
    driving_tips: Arc<RwLock<BTreeMap<DrivingTipId, DrivingTip>>>,
    users: Arc<RwLock<BTreeMap<UserId, User>>>,
}

// Ids start at 1 and grow with each insert; nothing is ever removed.
fn next_id<K: Copy, V>(map: &BTreeMap<K, V>, raw: impl Fn(K) -> i32) -> i32 {
    map.keys().next_back().map_or(1, |id| raw(*id) + 1)
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// Builds a store filled with the bundled sample content.
    pub async fn seeded() -> Result<Self, Error> {
        let store = Store::new();
        store.seed().await?;
        Ok(store)
    }

    /// Loads the bundled seed files. States go first because questions and
    /// resources refer to them by id.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<(), Error> {
        let states: Vec<NewState> = serde_json::from_str(include_str!("../seed/states.json"))?;
        let questions: Vec<NewQuestion> =
            serde_json::from_str(include_str!("../seed/questions.json"))?;
        let resources: Vec<NewResource> =
            serde_json::from_str(include_str!("../seed/resources.json"))?;
        let tips: Vec<NewDrivingTip> =
            serde_json::from_str(include_str!("../seed/driving_tips.json"))?;

        let counts = (states.len(), questions.len(), resources.len(), tips.len());

        for state in states {
            self.create_state(state).await;
        }
        for question in questions {
            self.create_question(question).await?;
        }
        for resource in resources {
            self.create_resource(resource).await;
        }
        for tip in tips {
            self.create_driving_tip(tip).await;
        }

        event!(
            Level::INFO,
            states = counts.0,
            questions = counts.1,
            resources = counts.2,
            driving_tips = counts.3,
            "content store seeded"
        );
        Ok(())
    }

    pub async fn get_all_states(&self) -> Vec<State> {
        self.states.read().await.values().cloned().collect()
    }

    pub async fn get_state(&self, id: StateId) -> Option<State> {
        self.states.read().await.get(&id).cloned()
    }

    pub async fn get_state_by_abbreviation(&self, abbreviation: &str) -> Option<State> {
        self.states
            .read()
            .await
            .values()
            .find(|state| state.abbreviation.eq_ignore_ascii_case(abbreviation))
            .cloned()
    }

    pub async fn create_state(&self, new_state: NewState) -> State {
        let mut states = self.states.write().await;
        let id = StateId(next_id(&states, |id| id.0));
        let state = State {
            id,
            name: new_state.name,
            abbreviation: new_state.abbreviation,
            description: new_state.description,
            resource_url: new_state.resource_url,
            manual_url: new_state.manual_url,
        };
        states.insert(id, state.clone());
        state
    }

    pub async fn get_all_questions(&self) -> Vec<Question> {
        self.questions.read().await.values().cloned().collect()
    }

    /// Questions scoped to the given state plus the ones for every state.
    pub async fn get_questions_by_state(&self, state_id: StateId) -> Vec<Question> {
        self.questions
            .read()
            .await
            .values()
            .filter(|question| question.state_id.applies_to(&state_id))
            .cloned()
            .collect()
    }

    pub async fn get_questions_by_category(&self, category: &str) -> Vec<Question> {
        self.questions
            .read()
            .await
            .values()
            .filter(|question| question.category == category)
            .cloned()
            .collect()
    }

    pub async fn get_question(&self, id: QuestionId) -> Option<Question> {
        self.questions.read().await.get(&id).cloned()
    }

    pub async fn create_question(&self, new_question: NewQuestion) -> Result<Question, Error> {
        new_question.validate()?;

        let mut questions = self.questions.write().await;
        let id = QuestionId(next_id(&questions, |id| id.0));
        let question = Question {
            id,
            state_id: new_question.state_id,
            category: new_question.category,
            question: new_question.question,
            options: new_question.options,
            correct_answer: new_question.correct_answer,
            explanation: new_question.explanation,
        };
        questions.insert(id, question.clone());
        Ok(question)
    }

    pub async fn get_all_resources(&self) -> Vec<Resource> {
        self.resources.read().await.values().cloned().collect()
    }

    pub async fn get_resources_by_state(&self, state_id: StateId) -> Vec<Resource> {
        self.resources
            .read()
            .await
            .values()
            .filter(|resource| resource.state_id.applies_to(&state_id))
            .cloned()
            .collect()
    }

    pub async fn get_featured_resources(&self) -> Vec<Resource> {
        self.resources
            .read()
            .await
            .values()
            .filter(|resource| resource.featured)
            .cloned()
            .collect()
    }

    pub async fn get_resources_by_category(&self, category: &str) -> Vec<Resource> {
        self.resources
            .read()
            .await
            .values()
            .filter(|resource| resource.category == category)
            .cloned()
            .collect()
    }

    pub async fn get_resource(&self, id: ResourceId) -> Option<Resource> {
        self.resources.read().await.get(&id).cloned()
    }

    pub async fn create_resource(&self, new_resource: NewResource) -> Resource {
        let mut resources = self.resources.write().await;
        let id = ResourceId(next_id(&resources, |id| id.0));
        let resource = Resource {
            id,
            title: new_resource.title,
            description: new_resource.description,
            file_url: new_resource.file_url,
            file_size: new_resource.file_size,
            featured: new_resource.featured,
            category: new_resource.category,
            state_id: new_resource.state_id,
            image_url: new_resource.image_url,
            is_new: new_resource.is_new,
        };
        resources.insert(id, resource.clone());
        resource
    }

    pub async fn get_all_driving_tips(&self) -> Vec<DrivingTip> {
        self.driving_tips.read().await.values().cloned().collect()
    }

    pub async fn get_driving_tips_by_category(&self, category: &str) -> Vec<DrivingTip> {
        self.driving_tips
            .read()
            .await
            .values()
            .filter(|tip| tip.category == category)
            .cloned()
            .collect()
    }

    pub async fn get_driving_tip(&self, id: DrivingTipId) -> Option<DrivingTip> {
        self.driving_tips.read().await.get(&id).cloned()
    }

    pub async fn create_driving_tip(&self, new_tip: NewDrivingTip) -> DrivingTip {
        let mut tips = self.driving_tips.write().await;
        let id = DrivingTipId(next_id(&tips, |id| id.0));
        let tip = DrivingTip {
            id,
            title: new_tip.title,
            content: new_tip.content,
            category: new_tip.category,
        };
        tips.insert(id, tip.clone());
        tip
    }

    /// Subscribes an email, reusing the existing record if there is one.
    ///
    /// Emails are compared after trimming. The lookup and the insert happen
    /// under one write lock so two requests for the same email cannot both
    /// create a record.
    pub async fn subscribe_user(&self, new_user: NewUser) -> User {
        let email = new_user.email.trim();
        let mut users = self.users.write().await;

        if let Some(user) = users.values_mut().find(|u| u.email == email) {
            user.subscribed = true;
            return user.clone();
        }

        let id = UserId(next_id(&users, |id| id.0));
        let user = User {
            id,
            email: email.to_string(),
            subscribed: new_user.subscribed,
        };
        users.insert(id, user.clone());
        user
    }

    pub async fn unsubscribe_user(&self, email: &str) -> Result<User, Error> {
        let email = email.trim();
        match self
            .users
            .write()
            .await
            .values_mut()
            .find(|u| u.email == email)
        {
            Some(user) => {
                user.subscribed = false;
                Ok(user.clone())
            }
            None => Err(Error::UserNotFound(email.to_string())),
        }
    }

    pub async fn get_all_users(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }
}
