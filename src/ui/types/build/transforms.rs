use crate::core::{Record, TransformError};
use crate::transforms::{ascii_only, identity, lowercase, replace, uppercase};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::TransformChoice;

pub type BoxedTransform = Box<dyn FnMut(Record) -> Result<Record, TransformError>>;

fn boxed<F, E>(mut f: F) -> BoxedTransform
where
    F: FnMut(Record) -> Result<Record, E> + 'static,
    E: Into<TransformError>,
{
    Box::new(move |r| f(r).map_err(Into::into))
}

pub fn build_transform(choice: TransformChoice) -> Result<BoxedTransform, BuildError> {
    match choice {
        TransformChoice::Uppercase(_) => Ok(boxed(uppercase)),
        TransformChoice::Lowercase(_) => Ok(boxed(lowercase)),
        TransformChoice::Identity(_) => Ok(boxed(identity)),
        TransformChoice::AsciiOnly(_) => Ok(boxed(ascii_only)),
        TransformChoice::Replace(p) => {
            if p.pattern.is_empty() {
                return Err(BuildError::InvalidParameter(
                    "replace pattern must not be empty".into(),
                ));
            }
            Ok(boxed(replace(p.pattern, p.replacement)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::{NoTransformParams, ReplaceParameters};

    #[test]
    fn builds_every_kind() {
        let mut up = build_transform(TransformChoice::Uppercase(NoTransformParams {})).unwrap();
        assert_eq!(up("ab\n".into()).unwrap(), "AB\n");

        let mut ascii = build_transform(TransformChoice::AsciiOnly(NoTransformParams {})).unwrap();
        assert!(ascii("\u{e9}\n".into()).is_err());

        let mut rep = build_transform(TransformChoice::Replace(ReplaceParameters {
            pattern: "-".into(),
            replacement: "+".into(),
        }))
        .unwrap();
        assert_eq!(rep("a-b\n".into()).unwrap(), "a+b\n");
    }

    #[test]
    fn empty_replace_pattern_is_rejected() {
        let choice = TransformChoice::Replace(ReplaceParameters::default());
        let err = build_transform(choice).err().unwrap();
        assert!(matches!(err, BuildError::InvalidParameter(_)));
    }
}
