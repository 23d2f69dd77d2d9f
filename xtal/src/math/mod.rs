mod rank;
pub(crate) use self::rank::column_rank;

mod integer;
pub(crate) use self::integer::{integer_determinant, hermite_normal_form, to_integer_matrix, to_real_matrix};
