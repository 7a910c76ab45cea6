use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::error::{Error, Result};
use crate::model::{
    api::question::{Msg, QuestionDescription, QuestionSpec},
    db::question::{NewQuestion, Question},
    mongodb::{Coll, Id},
};

pub fn routes() -> Vec<Route> {
    routes![create_question, get_questions, get_question, delete_question]
}

/// Create a new question; the store assigns its ID.
///
/// There is no duplicate detection: resubmitting an identical payload
/// creates a second document.
#[post("/questoes", data = "<spec>", format = "json")]
async fn create_question(
    spec: Json<QuestionSpec>,
    new_questions: Coll<NewQuestion>,
    questions: Coll<Question>,
) -> Result<Json<QuestionDescription>> {
    // Insert, then read back the stored document including its assigned ID.
    let question: NewQuestion = spec.0.into();
    let new_id: Id = new_questions
        .insert_one(&question, None)
        .await?
        .inserted_id
        .as_object_id()
        .unwrap() // Valid because the ID comes directly from the DB.
        .into();

    let question = questions
        .find_one(new_id.as_doc(), None)
        .await?
        .unwrap(); // Just inserted.
    Ok(Json(question.into()))
}

/// List every question in the collection, unpaginated.
#[get("/questoes")]
async fn get_questions(questions: Coll<Question>) -> Result<Json<Vec<QuestionDescription>>> {
    let list: Vec<Question> = questions.find(None, None).await?.try_collect().await?;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

#[get("/questoes/<id>")]
async fn get_question(id: Id, questions: Coll<Question>) -> Result<Json<QuestionDescription>> {
    let question = questions
        .find_one(id.as_doc(), None)
        .await?
        .ok_or_else(|| Error::not_found("Question not found"))?;
    Ok(Json(question.into()))
}

#[delete("/questoes/<id>")]
async fn delete_question(id: Id, questions: Coll<Question>) -> Result<Json<Msg>> {
    let result = questions.delete_one(id.as_doc(), None).await?;
    if result.deleted_count == 0 {
        return Err(Error::not_found("Question not found"));
    }
    Ok(Json(Msg::new("Question removed")))
}
