//! gRPC transport for the student directory.

mod student_grpc;

pub use student_grpc::StudentGrpcService;
