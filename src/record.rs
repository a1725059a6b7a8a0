//! Record types held by the collection
//!
//! Every entity variant embeds a [`Person`] and carries its own identity.
//! Variants implement [`Entity`], which supplies the four operation
//! factories the dispatcher resolves commands through.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codec::{Encoding, IdPayload, Payload};
use crate::error::{RecordError, Result};
use crate::operation::{Action, Operation};
use crate::xml::{StaffXml, StudentXml, TeacherXml};

/// Fields shared by every entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub surname: String,
    pub personal_code: String,
}

impl Person {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        personal_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            personal_code: personal_code.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Assigned on create; any value in a create payload is discarded
    #[serde(default)]
    pub id: String,
    pub subject: String,
    pub salary: f64,
    #[serde(default)]
    pub classroom: Vec<String>,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default)]
    pub id: String,
    pub class: String,
    pub person: Person,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    #[serde(default)]
    pub id: String,
    pub salary: f64,
    pub classroom: String,
    pub phone: String,
    pub person: Person,
}

/// Object kind named by a command envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Teacher,
    Student,
    Staff,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Teacher, EntityKind::Student, EntityKind::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Teacher => "Teacher",
            EntityKind::Student => "Student",
            EntityKind::Staff => "Staff",
        }
    }

    /// Build the operation for `action` through this kind's own factories
    pub fn operation(&self, action: Action, encoding: Encoding, raw: &[u8]) -> Result<Operation> {
        match self {
            EntityKind::Teacher => Teacher::operation(action, encoding, raw),
            EntityKind::Student => Student::operation(action, encoding, raw),
            EntityKind::Staff => Staff::operation(action, encoding, raw),
        }
    }
}

impl FromStr for EntityKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RecordError::UnknownObject(s.to_string()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record variant that can be created, read, updated and deleted.
///
/// The provided methods decode the operation payload from the raw command
/// buffer. A new variant only has to name its kind, its XML shape and
/// expose its identity.
pub trait Entity: DeserializeOwned + Into<Record> {
    const KIND: EntityKind;

    /// Layout of this entity inside an XML `<data>` element
    type Xml: DeserializeOwned + Into<Self>;

    fn id(&self) -> &str;

    /// Decode the full entity carried under `data`
    fn decode_entity(encoding: Encoding, raw: &[u8]) -> Result<Self> {
        match encoding {
            Encoding::Xml => {
                let payload: Payload<Self::Xml> = encoding.decode(raw)?;
                Ok(payload.data.into())
            }
            Encoding::Json | Encoding::Toml => {
                let payload: Payload<Self> = encoding.decode(raw)?;
                Ok(payload.data)
            }
        }
    }

    fn create_operation(encoding: Encoding, raw: &[u8]) -> Result<Operation> {
        let entity = Self::decode_entity(encoding, raw)?;
        Ok(Operation::Create(entity.into()))
    }

    fn update_operation(encoding: Encoding, raw: &[u8]) -> Result<Operation> {
        let entity = Self::decode_entity(encoding, raw)?;
        if entity.id().is_empty() {
            return Err(RecordError::MissingId { kind: Self::KIND });
        }
        Ok(Operation::Update(entity.into()))
    }

    fn read_operation(encoding: Encoding, raw: &[u8]) -> Result<Operation> {
        let payload: Payload<IdPayload> = encoding.decode(raw)?;
        Ok(Operation::Read {
            kind: Self::KIND,
            id: payload.data.id,
        })
    }

    fn delete_operation(encoding: Encoding, raw: &[u8]) -> Result<Operation> {
        let payload: Payload<IdPayload> = encoding.decode(raw)?;
        Ok(Operation::Delete {
            kind: Self::KIND,
            id: payload.data.id,
        })
    }

    fn operation(action: Action, encoding: Encoding, raw: &[u8]) -> Result<Operation> {
        match action {
            Action::Create => Self::create_operation(encoding, raw),
            Action::Read => Self::read_operation(encoding, raw),
            Action::Update => Self::update_operation(encoding, raw),
            Action::Delete => Self::delete_operation(encoding, raw),
        }
    }
}

impl Entity for Teacher {
    const KIND: EntityKind = EntityKind::Teacher;
    type Xml = TeacherXml;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Student {
    const KIND: EntityKind = EntityKind::Student;
    type Xml = StudentXml;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Staff {
    const KIND: EntityKind = EntityKind::Staff;
    type Xml = StaffXml;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Any record stored in the collection
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Teacher(Teacher),
    Student(Student),
    Staff(Staff),
}

impl Record {
    pub fn id(&self) -> &str {
        match self {
            Record::Teacher(t) => &t.id,
            Record::Student(s) => &s.id,
            Record::Staff(s) => &s.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Teacher(_) => EntityKind::Teacher,
            Record::Student(_) => EntityKind::Student,
            Record::Staff(_) => EntityKind::Staff,
        }
    }

    pub fn person(&self) -> &Person {
        match self {
            Record::Teacher(t) => &t.person,
            Record::Student(s) => &s.person,
            Record::Staff(s) => &s.person,
        }
    }

    pub(crate) fn set_id(&mut self, id: String) {
        match self {
            Record::Teacher(t) => t.id = id,
            Record::Student(s) => s.id = id,
            Record::Staff(s) => s.id = id,
        }
    }
}

impl From<Teacher> for Record {
    fn from(t: Teacher) -> Self {
        Record::Teacher(t)
    }
}

impl From<Student> for Record {
    fn from(s: Student) -> Self {
        Record::Student(s)
    }
}

impl From<Staff> for Record {
    fn from(s: Staff) -> Self {
        Record::Staff(s)
    }
}

fn write_person(f: &mut fmt::Formatter<'_>, id: &str, person: &Person) -> fmt::Result {
    write!(
        f,
        "ID:{}\tName:{}\tSurname:{}\tPersonalCode:{}",
        id, person.name, person.surname, person.personal_code
    )
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_person(f, &self.id, &self.person)?;
        write!(
            f,
            "\tSalary:{:.2}\tSubject:{}\tClassroom:[{}]",
            self.salary,
            self.subject,
            self.classroom.join(" ")
        )
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_person(f, &self.id, &self.person)?;
        write!(f, "\tClass:{}", self.class)
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_person(f, &self.id, &self.person)?;
        write!(
            f,
            "\tSalary:{:.2}\tClassroom:{}\tPhone:{}",
            self.salary, self.classroom, self.phone
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Teacher(t) => t.fmt(f),
            Record::Student(s) => s.fmt(f),
            Record::Staff(s) => s.fmt(f),
        }
    }
}
