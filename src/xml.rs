//! XML shapes of entity payloads
//!
//! XML command files list the person fields directly inside `<data>` rather
//! than under a nested `person` element, and wrap a teacher's classrooms in
//! `<value>` items. These structs decode that layout and convert into the
//! regular record types.

use serde::Deserialize;

use crate::record::{Person, Staff, Student, Teacher};

/// `<classroom><value>101</value><value>102</value></classroom>`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClassroomList {
    #[serde(default)]
    pub value: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherXml {
    #[serde(default)]
    pub id: String,
    pub subject: String,
    pub salary: f64,
    #[serde(default)]
    pub classroom: ClassroomList,
    pub name: String,
    pub surname: String,
    pub personal_code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentXml {
    #[serde(default)]
    pub id: String,
    pub class: String,
    pub name: String,
    pub surname: String,
    pub personal_code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffXml {
    #[serde(default)]
    pub id: String,
    pub salary: f64,
    pub classroom: String,
    pub phone: String,
    pub name: String,
    pub surname: String,
    pub personal_code: String,
}

impl From<TeacherXml> for Teacher {
    fn from(x: TeacherXml) -> Self {
        Teacher {
            id: x.id,
            subject: x.subject,
            salary: x.salary,
            classroom: x.classroom.value,
            person: Person::new(x.name, x.surname, x.personal_code),
        }
    }
}

impl From<StudentXml> for Student {
    fn from(x: StudentXml) -> Self {
        Student {
            id: x.id,
            class: x.class,
            person: Person::new(x.name, x.surname, x.personal_code),
        }
    }
}

impl From<StaffXml> for Staff {
    fn from(x: StaffXml) -> Self {
        Staff {
            id: x.id,
            salary: x.salary,
            classroom: x.classroom,
            phone: x.phone,
            person: Person::new(x.name, x.surname, x.personal_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Encoding, Payload};

    #[test]
    fn test_teacher_classroom_values() {
        let raw = br#"<command>
            <action>update</action>
            <object>Teacher</object>
            <data>
                <id>3</id>
                <subject>History</subject>
                <salary>420.5</salary>
                <classroom><value>101</value><value>204</value></classroom>
                <name>A</name>
                <surname>B</surname>
                <personalCode>X1</personalCode>
            </data>
        </command>"#;

        let payload: Payload<TeacherXml> = Encoding::Xml.decode(raw).unwrap();
        let teacher = Teacher::from(payload.data);
        assert_eq!(teacher.id, "3");
        assert_eq!(teacher.salary, 420.5);
        assert_eq!(teacher.classroom, vec!["101", "204"]);
        assert_eq!(teacher.person, Person::new("A", "B", "X1"));
    }

    #[test]
    fn test_teacher_without_classrooms() {
        let raw = br#"<command><data><subject>Art</subject><salary>1</salary><name>A</name><surname>B</surname><personalCode>Z</personalCode></data></command>"#;

        let payload: Payload<TeacherXml> = Encoding::Xml.decode(raw).unwrap();
        assert!(payload.data.classroom.value.is_empty());
        assert!(payload.data.id.is_empty());
    }

    #[test]
    fn test_staff_missing_phone_is_rejected() {
        let raw = br#"<command><data><salary>10</salary><classroom>7</classroom><name>A</name><surname>B</surname><personalCode>Z</personalCode></data></command>"#;

        let err = Encoding::Xml.decode::<Payload<StaffXml>>(raw).unwrap_err();
        assert!(matches!(err, crate::error::RecordError::Decode { encoding: Encoding::Xml, .. }));
    }
}
