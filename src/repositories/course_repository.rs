use async_trait::async_trait;
use futures::TryStreamExt;
#[cfg(test)]
use mockall::automock;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{self, Database},
    errors::AppResult,
    models::domain::{Course, Lecture},
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: Course) -> AppResult<Course>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>>;
    async fn list_all(&self) -> AppResult<Vec<Course>>;
    async fn list_by_instructor(&self, instructor_id: &str) -> AppResult<Vec<Course>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait LectureRepository: Send + Sync {
    async fn create(&self, lecture: Lecture) -> AppResult<Lecture>;
    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Lecture>>;
}

pub struct MongoCourseRepository {
    collection: Collection<Course>,
}

impl MongoCourseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(db::COURSES);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for courses collection");

        db::ensure_id_index(&self.collection).await?;
        db::ensure_field_index(&self.collection, "instructor_id").await?;

        log::info!("Successfully created indexes for courses collection");
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        self.collection.insert_one(&course).await?;
        Ok(course)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        let course = self.collection.find_one(doc! { "id": id }).await?;
        Ok(course)
    }

    async fn list_all(&self) -> AppResult<Vec<Course>> {
        let cursor = self.collection.find(doc! {}).await?;
        let courses: Vec<Course> = cursor.try_collect().await?;
        Ok(courses)
    }

    async fn list_by_instructor(&self, instructor_id: &str) -> AppResult<Vec<Course>> {
        let courses = self
            .collection
            .find(doc! { "instructor_id": instructor_id })
            .await?
            .try_collect()
            .await?;
        Ok(courses)
    }
}

pub struct MongoLectureRepository {
    collection: Collection<Lecture>,
}

impl MongoLectureRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(db::LECTURES);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        db::ensure_id_index(&self.collection).await?;
        db::ensure_field_index(&self.collection, "course_id").await?;
        Ok(())
    }
}

#[async_trait]
impl LectureRepository for MongoLectureRepository {
    async fn create(&self, lecture: Lecture) -> AppResult<Lecture> {
        self.collection.insert_one(&lecture).await?;
        Ok(lecture)
    }

    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<Lecture>> {
        let mut lectures: Vec<Lecture> = self
            .collection
            .find(doc! { "course_id": course_id })
            .await?
            .try_collect()
            .await?;
        lectures.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(lectures)
    }
}
