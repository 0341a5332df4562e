//! Session table row codec
//!
//! A row is four columns: `participant | step | room | choices`, where
//! `room` is empty until assigned and `choices` is a JSON array of ten slots.

use pickflick_application::StoreError;
use pickflick_domain::{Choices, ParticipantId, RoomCode, SessionRecord, Step};

/// Number of columns in a session table row
pub(crate) const COLUMNS: usize = 4;

/// A row as held by the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoredRow {
    Valid(SessionRecord),
    /// Row with a readable participant but undecodable state.
    ///
    /// Kept verbatim so rewriting the table does not lose it.
    Corrupt {
        fields: [String; COLUMNS],
        room: Option<RoomCode>,
        reason: String,
    },
}

impl StoredRow {
    pub(crate) fn room(&self) -> Option<&RoomCode> {
        match self {
            StoredRow::Valid(record) => record.room.as_ref(),
            StoredRow::Corrupt { room, .. } => room.as_ref(),
        }
    }

    pub(crate) fn to_fields(&self) -> Result<[String; COLUMNS], StoreError> {
        match self {
            StoredRow::Valid(record) => encode(record),
            StoredRow::Corrupt { fields, .. } => Ok(fields.clone()),
        }
    }
}

/// Outcome of decoding one raw row
#[derive(Debug)]
pub(crate) enum DecodedRow {
    /// Not a session row at all
    Skip(String),
    Row(ParticipantId, StoredRow),
}

pub(crate) fn encode(record: &SessionRecord) -> Result<[String; COLUMNS], StoreError> {
    let choices = record
        .choices
        .to_json()
        .map_err(|e| StoreError::Encoding(e.to_string()))?;
    Ok([
        record.participant.to_string(),
        record.step.to_string(),
        record
            .room
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        choices,
    ])
}

pub(crate) fn decode<'a>(fields: impl IntoIterator<Item = &'a str>) -> DecodedRow {
    let fields: Vec<&str> = fields.into_iter().collect();
    let Ok(fields) = <[&str; COLUMNS]>::try_from(fields.as_slice()) else {
        return DecodedRow::Skip(format!("expected {} columns, found {}", COLUMNS, fields.len()));
    };
    let [participant, step, room, choices] = fields;

    let participant = match participant.parse::<ParticipantId>() {
        Ok(id) => id,
        Err(e) => return DecodedRow::Skip(format!("bad participant '{}': {}", participant, e)),
    };

    let room = if room.is_empty() {
        Ok(None)
    } else {
        RoomCode::new(room).map(Some)
    };

    let decoded = step.parse::<Step>().and_then(|step| {
        let room = room.clone()?;
        let choices = Choices::from_json(choices)?;
        Ok(SessionRecord {
            participant,
            step,
            room,
            choices,
        })
    });

    let row = match decoded {
        Ok(record) => StoredRow::Valid(record),
        Err(e) => StoredRow::Corrupt {
            fields: fields.map(str::to_string),
            room: room.ok().flatten(),
            reason: e.to_string(),
        },
    };
    DecodedRow::Row(participant, row)
}
